use super::ApiError;

pub fn validate_email(email: &str) -> Result<&str, ApiError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Email is required"));
    }

    let mut parts = trimmed.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(ApiError::validation(format!("Invalid email: {}", trimmed)));
    }

    Ok(trimmed)
}

pub fn validate_password(password: &str) -> Result<&str, ApiError> {
    if password.len() < 8 {
        return Err(ApiError::validation(
            "Password must be at least 8 characters",
        ));
    }
    Ok(password)
}

pub fn validate_otp(otp: i32) -> Result<i32, ApiError> {
    if !(100_000..=999_999).contains(&otp) {
        return Err(ApiError::validation("OTP must be a six-digit number"));
    }
    Ok(otp)
}

pub fn validate_gpa(gpa: f64) -> Result<f64, ApiError> {
    if !(0.0..=4.0).contains(&gpa) {
        return Err(ApiError::validation(format!(
            "Invalid GPA: {}. GPA must be between 0.0 and 4.0",
            gpa
        )));
    }
    Ok(gpa)
}

pub fn validate_required<'a>(field: &str, value: &'a str) -> Result<&'a str, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(format!("{} is required", field)));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("  padded@example.org  ").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@x.com").is_err());
        assert!(validate_email("a@nodot").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("long enough").is_ok());
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn test_validate_otp() {
        assert!(validate_otp(100_000).is_ok());
        assert!(validate_otp(999_999).is_ok());
        assert!(validate_otp(99_999).is_err());
        assert!(validate_otp(1_000_000).is_err());
        assert!(validate_otp(-123_456).is_err());
    }

    #[test]
    fn test_validate_gpa() {
        assert!(validate_gpa(0.0).is_ok());
        assert!(validate_gpa(3.5).is_ok());
        assert!(validate_gpa(4.0).is_ok());
        assert!(validate_gpa(4.1).is_err());
        assert!(validate_gpa(-0.1).is_err());
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("First name", "Ada").is_ok());
        assert!(validate_required("First name", "   ").is_err());
    }
}
