//! Error types for the OpenEscrow ledger.
//!
//! All errors use the `OE_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Catalog errors
//! - 2xx: Balance errors
//! - 3xx: Purchase errors
//! - 4xx: Withdrawal errors
//! - 9xx: Invariant violations
//!
//! Every error is a precondition failure detected before any mutation:
//! if an operation returns an error, nothing changed. Cancellation-driven
//! refunds are *not* errors — they are a normal fee-free success path.

use thiserror::Error;

use crate::{OrgId, PackageId, ServiceId};

/// Central error enum for all OpenEscrow operations.
#[derive(Debug, Error)]
pub enum EscrowError {
    // =================================================================
    // Catalog Errors (1xx)
    // =================================================================
    /// The organization id does not resolve in the registry.
    #[error("OE_ERR_100: Unknown organization: {0}")]
    UnknownOrganization(OrgId),

    /// The service id is not currently owned by the organization.
    #[error("OE_ERR_101: Unknown service: {0}")]
    UnknownService(ServiceId),

    /// The package id is not currently owned by the organization.
    #[error("OE_ERR_102: Unknown package: {0}")]
    UnknownPackage(PackageId),

    /// A package member list is structurally invalid (duplicate entry,
    /// or fewer members than the package floor).
    #[error("OE_ERR_103: Invalid member list: {reason}")]
    InvalidMemberList { reason: String },

    // =================================================================
    // Balance Errors (2xx)
    // =================================================================
    /// A balance split asked for more units than are held.
    #[error("OE_ERR_200: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u64, available: u64 },

    // =================================================================
    // Purchase Errors (3xx)
    // =================================================================
    /// The supplied payment is below the item's current price.
    #[error("OE_ERR_300: Insufficient payment: price is {required}, supplied {supplied}")]
    InsufficientPayment { required: u64, supplied: u64 },

    // =================================================================
    // Withdrawal Errors (4xx)
    // =================================================================
    /// Organization income is below the per-call withdrawal floor.
    #[error("OE_ERR_400: Insufficient income: have {income}, floor is {floor}")]
    InsufficientIncome { income: u64, floor: u64 },

    /// The platform commission balance is empty.
    #[error("OE_ERR_401: No platform income to withdraw")]
    NoIncome,

    // =================================================================
    // Invariant Violations (9xx)
    // =================================================================
    /// Money-supply conservation check failed — critical safety alert.
    #[error("OE_ERR_900: Conservation violation: expected {expected} outstanding, found {actual}")]
    ConservationViolation { expected: u64, actual: u64 },
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, EscrowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_code() {
        let err = EscrowError::UnknownOrganization(OrgId::new());
        let msg = format!("{err}");
        assert!(msg.starts_with("OE_ERR_100"), "Got: {msg}");
    }

    #[test]
    fn insufficient_payment_display() {
        let err = EscrowError::InsufficientPayment {
            required: 85,
            supplied: 80,
        };
        let msg = format!("{err}");
        assert!(msg.contains("OE_ERR_300"));
        assert!(msg.contains("85"));
        assert!(msg.contains("80"));
    }

    #[test]
    fn all_errors_have_oe_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(EscrowError::UnknownService(ServiceId::new())),
            Box::new(EscrowError::UnknownPackage(PackageId::new())),
            Box::new(EscrowError::InvalidMemberList {
                reason: "test".into(),
            }),
            Box::new(EscrowError::InsufficientIncome {
                income: 99,
                floor: 100,
            }),
            Box::new(EscrowError::NoIncome),
            Box::new(EscrowError::ConservationViolation {
                expected: 1,
                actual: 2,
            }),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("OE_ERR_"),
                "Error missing OE_ERR_ prefix: {msg}"
            );
        }
    }
}
