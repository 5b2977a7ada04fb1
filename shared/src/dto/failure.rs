use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable machine-readable failure reasons for the four auth operations.
///
/// Codes are the contract for programmatic branching; the display message
/// travels separately in [`BackendFailure`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureCode {
    InvalidCredentials,
    AccountExpired,
    InvalidVoucher,
    VoucherUsed,
    NotFound,
    Pending,
    StkTimeout,
}

impl FailureCode {
    /// Wire form of the code, e.g. `INVALID_CREDENTIALS`.
    pub fn as_str(self) -> &'static str {
        match self {
            FailureCode::InvalidCredentials => "INVALID_CREDENTIALS",
            FailureCode::AccountExpired => "ACCOUNT_EXPIRED",
            FailureCode::InvalidVoucher => "INVALID_VOUCHER",
            FailureCode::VoucherUsed => "VOUCHER_USED",
            FailureCode::NotFound => "NOT_FOUND",
            FailureCode::Pending => "PENDING",
            FailureCode::StkTimeout => "STK_TIMEOUT",
        }
    }

    /// Canonical user-facing message for this code.
    pub fn default_message(self) -> &'static str {
        match self {
            FailureCode::InvalidCredentials => "Wrong username or password.",
            FailureCode::AccountExpired => {
                "Your account has expired. Please purchase a new plan."
            }
            FailureCode::InvalidVoucher => "Voucher code not found. Check and try again.",
            FailureCode::VoucherUsed => "This voucher has already been redeemed.",
            FailureCode::NotFound => "Receipt not found. Double-check the number.",
            FailureCode::Pending => "Payment still processing. Try again in a moment.",
            FailureCode::StkTimeout => {
                "Payment request timed out or was cancelled. Please try again."
            }
        }
    }
}

/// Typed failure returned by every backend operation.
///
/// Carries the stable [`FailureCode`] plus a human-readable message suitable
/// for direct display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BackendFailure {
    pub code: FailureCode,
    pub message: String,
}

impl BackendFailure {
    /// Build a failure carrying the code's canonical message.
    pub fn from_code(code: FailureCode) -> Self {
        Self {
            code,
            message: code.default_message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_wire_form() {
        assert_eq!(FailureCode::InvalidCredentials.as_str(), "INVALID_CREDENTIALS");
        assert_eq!(FailureCode::StkTimeout.as_str(), "STK_TIMEOUT");
    }

    #[test]
    fn test_code_serializes_to_wire_form() {
        let json = serde_json::to_string(&FailureCode::VoucherUsed).unwrap();
        assert_eq!(json, "\"VOUCHER_USED\"");
    }

    #[test]
    fn test_failure_displays_message() {
        let failure = BackendFailure::from_code(FailureCode::VoucherUsed);
        assert_eq!(failure.to_string(), "This voucher has already been redeemed.");
        assert_eq!(failure.code, FailureCode::VoucherUsed);
    }
}
