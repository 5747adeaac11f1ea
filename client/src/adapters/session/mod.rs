//! Session persistence adapter

pub mod file_store;

pub use file_store::FileSessionStore;
