//! Redemption and refund — the only paths that move money out of escrow.
//!
//! Every entry point consumes the certificate by value, so single
//! consumption is a property of the type system, not of runtime state.
//! Before anything else, the live registry (not the purchase-time
//! snapshot) is checked for cancellation: a destroyed organization,
//! service, or package means the purchase is void through no fault of
//! the customer, and the entire held balance comes back fee-free —
//! identically for redeem and refund.
//!
//! Package settlement additionally prorates for members that were
//! individually removed since purchase: `⌊held / n⌋` per removed member
//! is refunded fee-free and the certificate's own snapshot shrinks to
//! the survivors. Integer dust stays in the held balance and is swept by
//! whichever payout happens next — deferred, never lost.

use openescrow_catalog::MarketRegistry;
use openescrow_types::{
    Balance, CertificateId, MarketNotice, OrgId, PackageCertificate, PackageId, RefundReason,
    ServiceCertificate, ServiceId, constants,
};
use serde::Serialize;

/// What a settlement did with the escrowed funds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SettlementOutcome {
    /// The full held balance was credited to the organization.
    Redeemed { credited: u64 },
    /// Customer-initiated refund: `fee` went to the organization, the
    /// rest came back.
    Refunded { fee: u64 },
    /// The referenced entity was gone; the full held balance came back
    /// fee-free.
    Voided { reason: RefundReason },
    /// Package redemption with removed members: `refunded` came back
    /// fee-free, `credited` (including dust) went to the organization.
    ProratedRedemption { refunded: u64, credited: u64 },
    /// Package refund with removed members: `refunded` came back
    /// fee-free, then the fee split applied to the remainder.
    ProratedRefund { refunded: u64, fee: u64 },
}

/// The result of presenting a certificate: the outcome plus whatever
/// balance is paid back to the presenter.
#[derive(Debug, Serialize)]
pub struct SettlementReceipt {
    pub certificate: CertificateId,
    pub outcome: SettlementOutcome,
    pub payout: Balance,
}

// ---------------------------------------------------------------------------
// Service certificates
// ---------------------------------------------------------------------------

/// Redeem ("enjoy") a service certificate. The held balance funds the
/// organization's income — unless the purchase is void, in which case it
/// all comes back to the presenter.
pub fn redeem_service(
    registry: &mut MarketRegistry,
    certificate: ServiceCertificate,
) -> SettlementReceipt {
    let ServiceCertificate {
        id,
        organization,
        service,
        held,
    } = certificate;

    if let Some(reason) = service_void_reason(registry, organization, service) {
        return void_refund(registry, id, reason, held);
    }

    let credited = held.amount();
    credit_income(registry, organization, held);
    tracing::info!(certificate = %id, organization = %organization, credited, "service redeemed");
    registry.record_event(MarketNotice::RedemptionConfirmed {
        certificate: id,
        organization,
        amount: credited,
    });
    SettlementReceipt {
        certificate: id,
        outcome: SettlementOutcome::Redeemed { credited },
        payout: Balance::zero(),
    }
}

/// Customer-initiated refund of a service certificate: 10% of the held
/// balance goes to the organization as a cancellation fee, the rest
/// comes back. Void purchases come back in full instead.
pub fn refund_service(
    registry: &mut MarketRegistry,
    certificate: ServiceCertificate,
) -> SettlementReceipt {
    let ServiceCertificate {
        id,
        organization,
        service,
        mut held,
    } = certificate;

    if let Some(reason) = service_void_reason(registry, organization, service) {
        return void_refund(registry, id, reason, held);
    }

    let fee = held.split_div(constants::REFUND_FEE_DIVISOR);
    let fee_units = fee.amount();
    credit_income(registry, organization, fee);

    let returned = held.amount();
    tracing::info!(certificate = %id, organization = %organization, returned, fee = fee_units, "service refunded");
    registry.record_event(MarketNotice::RefundIssued {
        certificate: id,
        reason: RefundReason::CustomerInitiated,
        amount: returned,
    });
    SettlementReceipt {
        certificate: id,
        outcome: SettlementOutcome::Refunded { fee: fee_units },
        payout: held,
    }
}

// ---------------------------------------------------------------------------
// Package certificates
// ---------------------------------------------------------------------------

/// Redeem a package certificate. Members removed since purchase are
/// prorated back to the customer fee-free; the remainder, dust
/// included, funds the organization.
pub fn redeem_package(
    registry: &mut MarketRegistry,
    certificate: PackageCertificate,
) -> SettlementReceipt {
    let PackageCertificate {
        id,
        organization,
        package,
        mut members,
        mut held,
    } = certificate;

    if let Some(reason) = package_void_reason(registry, organization, package) {
        return void_refund(registry, id, reason, held);
    }

    let (refunded, payout) = prorate_removed(registry, id, organization, &mut members, &mut held);

    let credited = held.amount();
    credit_income(registry, organization, held);
    tracing::info!(certificate = %id, organization = %organization, credited, refunded, "package redeemed");
    registry.record_event(MarketNotice::RedemptionConfirmed {
        certificate: id,
        organization,
        amount: credited,
    });
    let outcome = if refunded > 0 {
        SettlementOutcome::ProratedRedemption { refunded, credited }
    } else {
        SettlementOutcome::Redeemed { credited }
    };
    SettlementReceipt {
        certificate: id,
        outcome,
        payout,
    }
}

/// Customer-initiated refund of a package certificate. Removed members
/// are prorated fee-free first; if *every* snapshot member is gone the
/// entire held balance comes back fee-free. Otherwise the remainder
/// takes the 10% fee split.
pub fn refund_package(
    registry: &mut MarketRegistry,
    certificate: PackageCertificate,
) -> SettlementReceipt {
    let PackageCertificate {
        id,
        organization,
        package,
        mut members,
        mut held,
    } = certificate;

    if let Some(reason) = package_void_reason(registry, organization, package) {
        return void_refund(registry, id, reason, held);
    }

    let survivors = surviving_member_count(registry, organization, &members);
    if survivors == 0 {
        // Every member was canceled organization-side: full fee-free
        // refund, no fall-through to the fee path.
        return void_refund(registry, id, RefundReason::MemberRemoved, held);
    }

    let (refunded, mut payout) =
        prorate_removed(registry, id, organization, &mut members, &mut held);

    let fee = held.split_div(constants::REFUND_FEE_DIVISOR);
    let fee_units = fee.amount();
    credit_income(registry, organization, fee);

    let returned = held.amount();
    payout.merge(held);
    tracing::info!(
        certificate = %id,
        organization = %organization,
        returned,
        refunded,
        fee = fee_units,
        "package refunded"
    );
    registry.record_event(MarketNotice::RefundIssued {
        certificate: id,
        reason: RefundReason::CustomerInitiated,
        amount: returned,
    });
    let outcome = if refunded > 0 {
        SettlementOutcome::ProratedRefund {
            refunded,
            fee: fee_units,
        }
    } else {
        SettlementOutcome::Refunded { fee: fee_units }
    };
    SettlementReceipt {
        certificate: id,
        outcome,
        payout,
    }
}

// ---------------------------------------------------------------------------
// Shared settlement steps
// ---------------------------------------------------------------------------

fn service_void_reason(
    registry: &MarketRegistry,
    organization: OrgId,
    service: ServiceId,
) -> Option<RefundReason> {
    match registry.organization(organization) {
        None => Some(RefundReason::OrganizationGone),
        Some(org) if !org.has_service(service) => Some(RefundReason::ServiceGone),
        Some(_) => None,
    }
}

fn package_void_reason(
    registry: &MarketRegistry,
    organization: OrgId,
    package: PackageId,
) -> Option<RefundReason> {
    match registry.organization(organization) {
        None => Some(RefundReason::OrganizationGone),
        Some(org) if org.package(package).is_none() => Some(RefundReason::PackageGone),
        Some(_) => None,
    }
}

fn surviving_member_count(
    registry: &MarketRegistry,
    organization: OrgId,
    members: &[ServiceId],
) -> usize {
    registry.organization(organization).map_or(0, |org| {
        members.iter().filter(|m| org.has_service(**m)).count()
    })
}

/// Refund `⌊held / n⌋` per snapshot member no longer in the live
/// catalog, fee-free, and shrink the snapshot to the survivors. Mutates
/// the certificate's own fields — there is no cloned snapshot or
/// synthetic balance, so the prorated units cannot also reach the
/// organization's income.
fn prorate_removed(
    registry: &mut MarketRegistry,
    certificate: CertificateId,
    organization: OrgId,
    members: &mut Vec<ServiceId>,
    held: &mut Balance,
) -> (u64, Balance) {
    let total = members.len() as u64;
    let survivors = surviving_member_count(registry, organization, members);
    let gone = total - survivors as u64;
    if gone == 0 || total == 0 {
        return (0, Balance::zero());
    }

    let prorated = held.split_shares(total, gone);
    let refunded = prorated.amount();
    if let Some(org) = registry.organization(organization) {
        members.retain(|m| org.has_service(*m));
    }
    tracing::debug!(certificate = %certificate, refunded, removed = gone, "prorated removed members");
    registry.record_event(MarketNotice::RefundIssued {
        certificate,
        reason: RefundReason::MemberRemoved,
        amount: refunded,
    });
    (refunded, prorated)
}

/// Full fee-free payout: the purchase is void through no fault of the
/// customer.
fn void_refund(
    registry: &mut MarketRegistry,
    certificate: CertificateId,
    reason: RefundReason,
    held: Balance,
) -> SettlementReceipt {
    let amount = held.amount();
    tracing::info!(certificate = %certificate, %reason, amount, "purchase void, full refund");
    registry.record_event(MarketNotice::RefundIssued {
        certificate,
        reason,
        amount,
    });
    SettlementReceipt {
        certificate,
        outcome: SettlementOutcome::Voided { reason },
        payout: held,
    }
}

/// Credit settled funds to an organization. Callers have already
/// confirmed the organization is live within this same operation.
fn credit_income(registry: &mut MarketRegistry, organization: OrgId, funds: Balance) {
    debug_assert!(registry.organization(organization).is_some());
    if let Some(org) = registry.organization_mut(organization) {
        org.credit_income(funds);
    }
}
