//! Input validation utilities

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.chars().count() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    Ok(())
}

/// Validate that a date of birth lies strictly before `now`
pub fn validate_date_of_birth(date_of_birth: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), String> {
    if date_of_birth >= now {
        return Err("Date of Birth must be in the past".to_string());
    }

    Ok(())
}

/// Validate gender
pub fn validate_gender(gender: &str) -> Result<(), String> {
    if gender.trim().is_empty() {
        return Err("Gender is required".to_string());
    }

    if gender.len() > 32 {
        return Err("Gender must be at most 32 characters long".to_string());
    }

    Ok(())
}

/// Validate a catalog or purchase line name
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name is required".to_string());
    }

    Ok(())
}

/// Validate a monetary amount
pub fn validate_price(field: &str, amount: f64) -> Result<(), String> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(format!("{field} must be a non-negative number"));
    }

    Ok(())
}

/// Validate a quantity
pub fn validate_quantity(quantity: i64) -> Result<(), String> {
    if quantity < 0 {
        return Err("Quantity must not be negative".to_string());
    }

    Ok(())
}
