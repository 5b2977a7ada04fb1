/// Validation for portal input fields

/// Syntactic failure reasons for raw user input.
///
/// Each variant identifies the offending field; [`message`](Self::message)
/// gives the inline text shown next to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingUsername,
    MissingPassword,
    MissingCode,
    MissingReceiptId,
    MissingPhone,
    InvalidPhoneFormat,
}

impl ValidationError {
    /// Inline message shown below the offending field.
    pub fn message(self) -> &'static str {
        match self {
            ValidationError::MissingUsername => "Username is required.",
            ValidationError::MissingPassword => "Password is required.",
            ValidationError::MissingCode => "Please enter a voucher code.",
            ValidationError::MissingReceiptId => "Please enter your receipt number.",
            ValidationError::MissingPhone => "Phone number is required.",
            ValidationError::InvalidPhoneFormat => {
                "Enter a valid Kenyan number e.g. 0712 345 678"
            }
        }
    }
}

pub type ValidationResult = std::result::Result<(), ValidationError>;

/// Validate the login username field.
pub fn validate_username(username: &str) -> ValidationResult {
    if username.trim().is_empty() {
        return Err(ValidationError::MissingUsername);
    }
    Ok(())
}

/// Validate the login password field.
pub fn validate_password(password: &str) -> ValidationResult {
    if password.trim().is_empty() {
        return Err(ValidationError::MissingPassword);
    }
    Ok(())
}

/// Validate a voucher code.
pub fn validate_voucher_code(code: &str) -> ValidationResult {
    if code.trim().is_empty() {
        return Err(ValidationError::MissingCode);
    }
    Ok(())
}

/// Validate a receipt number.
pub fn validate_receipt_id(receipt_id: &str) -> ValidationResult {
    if receipt_id.trim().is_empty() {
        return Err(ValidationError::MissingReceiptId);
    }
    Ok(())
}

/// Validate a Kenyan mobile number and return its normalized `+254` form.
///
/// Accepts `07XXXXXXXX`, `01XXXXXXXX`, `2547XXXXXXXX`, `+2541XXXXXXXX` and
/// so on; internal whitespace is stripped before matching.
pub fn validate_phone(raw: &str) -> std::result::Result<String, ValidationError> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    if cleaned.is_empty() {
        return Err(ValidationError::MissingPhone);
    }

    if !is_kenyan_mobile(&cleaned) {
        return Err(ValidationError::InvalidPhoneFormat);
    }

    Ok(normalize_phone(&cleaned))
}

fn is_kenyan_mobile(cleaned: &str) -> bool {
    // Subscriber part: 9 digits starting with 7 (Safaricom) or 1 (Airtel)
    let subscriber = if let Some(rest) = cleaned.strip_prefix("+254") {
        rest
    } else if let Some(rest) = cleaned.strip_prefix("254") {
        rest
    } else if let Some(rest) = cleaned.strip_prefix('0') {
        rest
    } else {
        return false;
    };

    subscriber.len() == 9
        && subscriber.starts_with(['7', '1'])
        && subscriber.chars().all(|c| c.is_ascii_digit())
}

/// Normalize a Kenyan number to its international `+254` form.
///
/// Idempotent: already-normalized input passes through unchanged. Input that
/// matches none of the accepted prefixes is returned as-is (callers validate
/// first).
pub fn normalize_phone(phone: &str) -> String {
    let cleaned: String = phone.chars().filter(|c| !c.is_whitespace()).collect();

    if cleaned.starts_with("+254") {
        cleaned
    } else if cleaned.starts_with("254") {
        format!("+{}", cleaned)
    } else if let Some(rest) = cleaned.strip_prefix('0') {
        format!("+254{}", rest)
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fields_fail_with_missing_reason() {
        assert_eq!(validate_username(""), Err(ValidationError::MissingUsername));
        assert_eq!(validate_username("   "), Err(ValidationError::MissingUsername));
        assert_eq!(validate_password(""), Err(ValidationError::MissingPassword));
        assert_eq!(validate_voucher_code("  \t"), Err(ValidationError::MissingCode));
        assert_eq!(validate_receipt_id(""), Err(ValidationError::MissingReceiptId));
        assert_eq!(validate_phone("  "), Err(ValidationError::MissingPhone));
    }

    #[test]
    fn test_non_empty_fields_pass() {
        assert!(validate_username("demo").is_ok());
        assert!(validate_password("1234").is_ok());
        assert!(validate_voucher_code("SPEED-1234").is_ok());
        assert!(validate_receipt_id("RCP001").is_ok());
    }

    #[test]
    fn test_phone_accepted_forms() {
        assert_eq!(validate_phone("0712345678").unwrap(), "+254712345678");
        assert_eq!(validate_phone("0112345678").unwrap(), "+254112345678");
        assert_eq!(validate_phone("254712345678").unwrap(), "+254712345678");
        assert_eq!(validate_phone("+254712345678").unwrap(), "+254712345678");
        // Internal whitespace is stripped before matching
        assert_eq!(validate_phone("0712 345 678").unwrap(), "+254712345678");
    }

    #[test]
    fn test_phone_rejected_forms() {
        assert_eq!(validate_phone("12345"), Err(ValidationError::InvalidPhoneFormat));
        assert_eq!(validate_phone("0812345678"), Err(ValidationError::InvalidPhoneFormat));
        assert_eq!(validate_phone("071234567"), Err(ValidationError::InvalidPhoneFormat)); // too short
        assert_eq!(validate_phone("07123456789"), Err(ValidationError::InvalidPhoneFormat)); // too long
        assert_eq!(validate_phone("+1555123456"), Err(ValidationError::InvalidPhoneFormat));
        assert_eq!(validate_phone("07123abc78"), Err(ValidationError::InvalidPhoneFormat));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        for raw in ["0712345678", "254712345678", "+254712345678", "0712 345 678"] {
            let once = normalize_phone(raw);
            assert_eq!(normalize_phone(&once), once);
            assert!(once.starts_with("+254"));
            assert_eq!(once.len(), "+254".len() + 9);
        }
    }
}
