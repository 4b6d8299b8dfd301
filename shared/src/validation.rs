//! Validation utilities for the Shop Inventory Management Platform
//!
//! Hand-rolled checks shared by the backend's input boundary. Each returns
//! a static message suitable for a field-level validation error.

use rust_decimal::Decimal;

// ============================================================================
// Quantity & Money Validations
// ============================================================================

/// Validate a line-item quantity (whole units, at least one)
pub fn validate_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity < 1 {
        return Err("Quantity must be at least 1");
    }
    Ok(())
}

/// Validate a monetary amount is not negative
pub fn validate_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount < Decimal::ZERO {
        return Err("Amount cannot be negative");
    }
    Ok(())
}

/// Validate an alert threshold (zero disables alerts, negative is invalid)
pub fn validate_alert_quantity(alert_quantity: i32) -> Result<(), &'static str> {
    if alert_quantity < 0 {
        return Err("Alert quantity cannot be negative");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate a required text field is present
pub fn validate_required(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err("Field is required");
    }
    Ok(())
}

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate phone number: 7-15 digits, optional separators and leading +
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 7 || digits.len() > 15 {
        return Err("Phone number must contain 7 to 15 digits");
    }
    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ' || c == '(' || c == ')')
    {
        return Err("Phone number contains invalid characters");
    }
    Ok(())
}

/// Validate a product slug (lowercase alphanumeric separated by hyphens)
pub fn validate_slug(slug: &str) -> Result<(), &'static str> {
    if slug.is_empty() {
        return Err("Slug is required");
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("Slug must be lowercase alphanumeric with hyphens");
    }
    if slug.starts_with('-') || slug.ends_with('-') || slug.contains("--") {
        return Err("Slug hyphens must separate words");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Quantity & Money Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(500).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(Decimal::ZERO).is_ok());
        assert!(validate_amount(Decimal::new(1999, 2)).is_ok());
        assert!(validate_amount(Decimal::from(-1)).is_err());
    }

    #[test]
    fn test_validate_alert_quantity() {
        assert!(validate_alert_quantity(0).is_ok());
        assert!(validate_alert_quantity(10).is_ok());
        assert!(validate_alert_quantity(-1).is_err());
    }

    // ========================================================================
    // General Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_required() {
        assert!(validate_required("Monthly stock take").is_ok());
        assert!(validate_required("").is_err());
        assert!(validate_required("   ").is_err());
    }

    #[test]
    fn test_validate_email_valid() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("user.name@domain.co.ke").is_ok());
    }

    #[test]
    fn test_validate_email_invalid() {
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@domain").is_err());
        assert!(validate_email("@.").is_err());
    }

    #[test]
    fn test_validate_phone_valid() {
        assert!(validate_phone("0712345678").is_ok());
        assert!(validate_phone("+254 712 345 678").is_ok());
        assert!(validate_phone("071-234-5678").is_ok());
    }

    #[test]
    fn test_validate_phone_invalid() {
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("1234567890123456").is_err());
        assert!(validate_phone("call-me-maybe").is_err());
    }

    #[test]
    fn test_validate_slug_valid() {
        assert!(validate_slug("sugar-1kg").is_ok());
        assert!(validate_slug("rice").is_ok());
        assert!(validate_slug("coca-cola-500ml").is_ok());
    }

    #[test]
    fn test_validate_slug_invalid() {
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Sugar-1kg").is_err());
        assert!(validate_slug("sugar 1kg").is_err());
        assert!(validate_slug("-sugar").is_err());
        assert!(validate_slug("sugar--1kg").is_err());
    }
}
