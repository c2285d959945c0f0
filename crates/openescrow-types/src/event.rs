//! Advisory market events for external indexing.
//!
//! Every catalog listing and settlement action produces a
//! [`MarketEvent`] that the host platform can drain from the registry.
//! Events are observability only — they are never part of correctness
//! and carry plain amounts, not balances.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CertificateId, OrgId, PackageId, ServiceId};

/// Why a refund was paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefundReason {
    /// The customer chose to cancel; the 10% fee applies.
    CustomerInitiated,
    /// The organization no longer exists — full fee-free refund.
    OrganizationGone,
    /// The purchased service no longer exists — full fee-free refund.
    ServiceGone,
    /// The purchased package no longer exists — full fee-free refund.
    PackageGone,
    /// Individual package members were removed after purchase; the
    /// prorated share is refunded fee-free.
    MemberRemoved,
}

impl std::fmt::Display for RefundReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CustomerInitiated => write!(f, "CUSTOMER_INITIATED"),
            Self::OrganizationGone => write!(f, "ORGANIZATION_GONE"),
            Self::ServiceGone => write!(f, "SERVICE_GONE"),
            Self::PackageGone => write!(f, "PACKAGE_GONE"),
            Self::MemberRemoved => write!(f, "MEMBER_REMOVED"),
        }
    }
}

/// The payload of a market event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketNotice {
    /// A new organization was registered.
    OrganizationListed { organization: OrgId, name: String },
    /// A new service went on sale.
    ServiceListed {
        organization: OrgId,
        service: ServiceId,
        name: String,
        price: u64,
    },
    /// A new package went on sale.
    PackageListed {
        organization: OrgId,
        package: PackageId,
        member_names: Vec<String>,
        price: u64,
    },
    /// Escrowed funds were returned to a certificate presenter.
    RefundIssued {
        certificate: CertificateId,
        reason: RefundReason,
        amount: u64,
    },
    /// Escrowed funds were released to the organization.
    RedemptionConfirmed {
        certificate: CertificateId,
        organization: OrgId,
        amount: u64,
    },
    /// Income was paid out to an organization (`Some`) or to the
    /// publisher (`None`).
    WithdrawalPaid {
        organization: Option<OrgId>,
        amount: u64,
        commission: u64,
    },
}

/// A timestamped market event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketEvent {
    pub notice: MarketNotice,
    pub emitted_at: DateTime<Utc>,
}

impl MarketEvent {
    /// Wrap a notice with the current timestamp.
    #[must_use]
    pub fn now(notice: MarketNotice) -> Self {
        Self {
            notice,
            emitted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refund_reason_display() {
        assert_eq!(RefundReason::CustomerInitiated.to_string(), "CUSTOMER_INITIATED");
        assert_eq!(RefundReason::MemberRemoved.to_string(), "MEMBER_REMOVED");
    }

    #[test]
    fn event_serde_roundtrip() {
        let event = MarketEvent::now(MarketNotice::RefundIssued {
            certificate: CertificateId::new(),
            reason: RefundReason::ServiceGone,
            amount: 50,
        });
        let json = serde_json::to_string(&event).unwrap();
        let back: MarketEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
