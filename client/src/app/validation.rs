//! Form validation rules
//!
//! Local checks run before any request is made. Every failing field is
//! reported, not just the first one.

use crate::domain::entities::{Credentials, QuoteDraft};
use crate::error::{AppError, ValidationErrors};

pub fn validate_credentials(credentials: &Credentials) -> Result<(), AppError> {
    let mut errors = ValidationErrors::new();

    if credentials.username.trim().is_empty() {
        errors.add("username", "Username is required");
    }
    if credentials.otp.trim().is_empty() {
        errors.add("otp", "OTP is required");
    }

    errors.into_result()
}

pub fn validate_draft(draft: &QuoteDraft) -> Result<(), AppError> {
    let mut errors = ValidationErrors::new();

    if draft.text.trim().is_empty() {
        errors.add("text", "Quote text is required");
    }

    match &draft.image {
        None => errors.add("image", "Image is required"),
        Some(image) if image.format().is_none() => {
            errors.add("image", "Unsupported file format")
        }
        Some(image) if image.is_empty() => errors.add("image", "Image file is empty"),
        Some(_) => {}
    }

    errors.into_result()
}
