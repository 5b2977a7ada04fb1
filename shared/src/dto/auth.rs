use serde::{Deserialize, Serialize};

/// Credential login success payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginGrant {
    pub username: String,
    /// Session duration label, e.g. "8h"
    pub session_label: String,
}

/// Voucher redemption success payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoucherGrant {
    /// Plan granted by the voucher, e.g. "4 hours"
    pub plan_label: String,
}

/// Receipt verification success payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReceiptGrant {
    pub plan_label: String,
    /// Phone number the receipt was issued against
    pub phone: String,
}

/// Push-payment success payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentGrant {
    /// Backend-issued receipt identifier, e.g. "RCP4K7Q2M"
    pub receipt_id: String,
    pub plan_label: String,
    /// Normalized phone the push was sent to
    pub phone: String,
}
