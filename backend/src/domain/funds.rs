//! Funds movement requests.
//!
//! Amounts are `f64` and may be negative. The only rules are that an amount
//! is finite and non-zero.

use super::rules::RuleViolation;

fn check_amount(amount: f64) -> Result<(), RuleViolation> {
    if !amount.is_finite() {
        return Err(RuleViolation::invalid_amount("amount"));
    }
    if amount == 0.0 {
        return Err(RuleViolation::missing_field("amount"));
    }
    Ok(())
}

/// Deposit or withdrawal against a single account.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transaction {
    /// Amount to move.
    pub amount: f64,
}

impl Transaction {
    /// Reject zero and non-finite amounts.
    pub fn validate(&self) -> Result<(), RuleViolation> {
        check_amount(self.amount)
    }
}

/// Movement between two accounts addressed by account number.
///
/// The accounts may belong to different users or to the same user.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    /// Amount to move.
    pub amount: f64,
    /// Source account number.
    pub from: String,
    /// Destination account number.
    pub to: String,
}

impl TransferRequest {
    /// Check `amount`, `from`, then `to`; the first violation wins.
    pub fn validate(&self) -> Result<(), RuleViolation> {
        check_amount(self.amount)?;
        if self.from.is_empty() {
            return Err(RuleViolation::missing_field("from"));
        }
        if self.to.is_empty() {
            return Err(RuleViolation::missing_field("to"));
        }
        Ok(())
    }
}
