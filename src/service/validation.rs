//! Request validation for the create bodies.

use crate::error::AppError;
use crate::schemas::{ItemCreate, UserCreate};
use regex::Regex;
use std::sync::OnceLock;

pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const TITLE_MAX_LENGTH: usize = 255;
pub const DESCRIPTION_MAX_LENGTH: usize = 1024;
pub const EMAIL_MAX_LENGTH: usize = 254;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

fn email_pattern() -> Result<&'static Regex, AppError> {
    static RE: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN))
        .as_ref()
        .map_err(|_| AppError::Validation("invalid pattern for email".into()))
}

pub struct RequestValidator;

impl RequestValidator {
    pub fn validate_user(body: &UserCreate) -> Result<(), AppError> {
        let email = body.email.trim();
        if email.is_empty() {
            return Err(AppError::Validation("email is required".into()));
        }
        if email.len() > EMAIL_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "email must be at most {} characters",
                EMAIL_MAX_LENGTH
            )));
        }
        if !email_pattern()?.is_match(email) {
            return Err(AppError::Validation("email must be a valid email".into()));
        }
        if body.password.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(AppError::Validation(format!(
                "password must be at least {} characters",
                PASSWORD_MIN_LENGTH
            )));
        }
        Ok(())
    }

    pub fn validate_item(body: &ItemCreate) -> Result<(), AppError> {
        if body.title.trim().is_empty() {
            return Err(AppError::Validation("title is required".into()));
        }
        max_chars("title", &body.title, TITLE_MAX_LENGTH)?;
        if let Some(description) = &body.description {
            max_chars("description", description, DESCRIPTION_MAX_LENGTH)?;
        }
        Ok(())
    }
}

fn max_chars(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}
