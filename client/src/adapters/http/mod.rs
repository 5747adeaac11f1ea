//! HTTP adapter for the remote quote service

pub mod client;

pub use client::HttpQuoteService;
