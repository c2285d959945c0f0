//! Withdrawal and platform commission.
//!
//! Organization income leaves the ledger only through withdrawal. Each
//! withdrawal call requires the income to have reached the 100-unit
//! floor (a per-call spam guard, not a cumulative one) and splits 1%
//! off to the platform — integer division, so the commission can be
//! zero right at the floor. The publisher drains the accumulated
//! commission with its own credential.

use openescrow_catalog::{MarketRegistry, OrgCapability, PublisherCredential};
use openescrow_types::{Balance, EscrowError, MarketNotice, Result, constants};

/// Pay out an organization's accumulated income to the capability
/// holder, splitting the platform commission first. Income resets to
/// zero.
///
/// # Errors
/// - `UnknownOrganization` if the organization is already gone
/// - `InsufficientIncome` if income is below the withdrawal floor
pub fn organization_withdraw(
    registry: &mut MarketRegistry,
    cap: &OrgCapability,
) -> Result<Balance> {
    let org_id = cap.organization();
    let income_units = registry
        .organization(org_id)
        .ok_or(EscrowError::UnknownOrganization(org_id))?
        .income_units();
    if income_units < constants::WITHDRAW_FLOOR_UNITS {
        return Err(EscrowError::InsufficientIncome {
            income: income_units,
            floor: constants::WITHDRAW_FLOOR_UNITS,
        });
    }

    let mut payout = match registry.organization_mut(org_id) {
        Some(org) => org.take_income(),
        None => return Err(EscrowError::UnknownOrganization(org_id)),
    };
    let commission = payout.split_div(constants::COMMISSION_DIVISOR);
    let commission_units = commission.amount();
    registry.credit_platform(commission);

    tracing::info!(
        organization = %org_id,
        amount = payout.amount(),
        commission = commission_units,
        "organization withdrawal"
    );
    registry.record_event(MarketNotice::WithdrawalPaid {
        organization: Some(org_id),
        amount: payout.amount(),
        commission: commission_units,
    });
    Ok(payout)
}

/// Drain the platform's accumulated commission.
///
/// # Errors
/// Returns `NoIncome` if the commission balance is empty.
pub fn publisher_withdraw(
    registry: &mut MarketRegistry,
    _credential: &PublisherCredential,
) -> Result<Balance> {
    if registry.platform_income_units() == 0 {
        return Err(EscrowError::NoIncome);
    }
    let payout = registry.take_platform_income();
    tracing::info!(amount = payout.amount(), "publisher withdrawal");
    registry.record_event(MarketNotice::WithdrawalPaid {
        organization: None,
        amount: payout.amount(),
        commission: 0,
    });
    Ok(payout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn funded_org(income: u64) -> (MarketRegistry, PublisherCredential, OrgCapability) {
        let (mut registry, publisher) = MarketRegistry::new();
        let cap = registry.create_organization("salon");
        registry
            .organization_mut(cap.organization())
            .unwrap()
            .credit_income(Balance::from_units(income));
        (registry, publisher, cap)
    }

    #[test]
    fn withdraw_below_floor_fails() {
        let (mut registry, _publisher, cap) = funded_org(99);
        let err = organization_withdraw(&mut registry, &cap).unwrap_err();
        assert!(matches!(
            err,
            EscrowError::InsufficientIncome {
                income: 99,
                floor: 100
            }
        ));
        // Income untouched.
        assert_eq!(
            registry.organization(cap.organization()).unwrap().income_units(),
            99
        );
    }

    #[test]
    fn withdraw_at_floor_has_boundary_commission() {
        let (mut registry, _publisher, cap) = funded_org(100);
        let payout = organization_withdraw(&mut registry, &cap).unwrap();
        assert_eq!(payout.into_units(), 99);
        assert_eq!(registry.platform_income_units(), 1);
        assert_eq!(
            registry.organization(cap.organization()).unwrap().income_units(),
            0
        );
    }

    #[test]
    fn withdraw_splits_one_percent() {
        let (mut registry, _publisher, cap) = funded_org(2_550);
        let payout = organization_withdraw(&mut registry, &cap).unwrap();
        assert_eq!(payout.into_units(), 2_550 - 25);
        assert_eq!(registry.platform_income_units(), 25);
    }

    #[test]
    fn floor_is_per_call_not_cumulative() {
        let (mut registry, _publisher, cap) = funded_org(100);
        organization_withdraw(&mut registry, &cap).unwrap();
        // Income reset; a second call must hit the floor again.
        let err = organization_withdraw(&mut registry, &cap).unwrap_err();
        assert!(matches!(err, EscrowError::InsufficientIncome { income: 0, .. }));
    }

    #[test]
    fn publisher_withdraw_drains_commission() {
        let (mut registry, publisher, cap) = funded_org(1_000);
        organization_withdraw(&mut registry, &cap).unwrap();
        assert_eq!(registry.platform_income_units(), 10);

        let payout = publisher_withdraw(&mut registry, &publisher).unwrap();
        assert_eq!(payout.into_units(), 10);
        assert_eq!(registry.platform_income_units(), 0);
    }

    #[test]
    fn publisher_withdraw_empty_fails() {
        let (mut registry, publisher) = MarketRegistry::new();
        let err = publisher_withdraw(&mut registry, &publisher).unwrap_err();
        assert!(matches!(err, EscrowError::NoIncome));
    }
}
