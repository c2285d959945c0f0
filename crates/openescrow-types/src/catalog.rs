//! Catalog value records: what can be bought.
//!
//! `Service` and `Package` are plain rows owned by one organization.
//! Certificates keep copies of their keys, never references — deleting a
//! row is always safe, and outstanding certificates detect the deletion
//! lazily at settlement time.

use serde::{Deserialize, Serialize};

use crate::ServiceId;
use crate::constants::{PACKAGE_DISCOUNT_DENOMINATOR, PACKAGE_DISCOUNT_NUMERATOR};

/// A single purchasable offering with a fixed price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    /// Price in ledger units. Zero is allowed.
    pub price: u64,
}

impl Service {
    #[must_use]
    pub fn new(name: impl Into<String>, price: u64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// A bundle of services sold at a combined price.
///
/// The member list is insertion-ordered and duplicate-free, and never
/// shorter than `MIN_PACKAGE_MEMBERS` while the package exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub members: Vec<ServiceId>,
    pub price: u64,
}

impl Package {
    #[must_use]
    pub fn new(members: Vec<ServiceId>, price: u64) -> Self {
        Self { members, price }
    }

    /// The default package price: 85% of the member price sum,
    /// integer-truncated. Computed in `u128` so that large member prices
    /// cannot overflow; a result beyond `u64::MAX` clamps to `u64::MAX`.
    #[must_use]
    pub fn default_price(member_prices: impl IntoIterator<Item = u64>) -> u64 {
        let sum: u128 = member_prices.into_iter().map(u128::from).sum();
        let discounted = sum * u128::from(PACKAGE_DISCOUNT_NUMERATOR)
            / u128::from(PACKAGE_DISCOUNT_DENOMINATOR);
        u64::try_from(discounted).unwrap_or(u64::MAX)
    }

    /// Whether the given service is a member of this package.
    #[must_use]
    pub fn contains(&self, service: ServiceId) -> bool {
        self.members.contains(&service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_price_is_85_percent_truncated() {
        assert_eq!(Package::default_price([50, 50]), 85);
        assert_eq!(Package::default_price([1, 1]), 1); // 2 * 85 / 100
        assert_eq!(Package::default_price([0, 0]), 0);
        assert_eq!(Package::default_price([33, 33, 33]), 84); // 99 * 85 / 100 = 84.15
    }

    #[test]
    fn default_price_survives_huge_member_prices() {
        let price = u64::MAX / 50;
        let expected = u64::try_from(u128::from(price) * 2 * 85 / 100).unwrap();
        assert_eq!(Package::default_price([price, price]), expected);
    }

    #[test]
    fn default_price_clamps_beyond_u64() {
        assert_eq!(
            Package::default_price([u64::MAX, u64::MAX, u64::MAX]),
            u64::MAX
        );
    }

    #[test]
    fn contains_checks_membership() {
        let a = ServiceId::new();
        let b = ServiceId::new();
        let c = ServiceId::new();
        let pkg = Package::new(vec![a, b], 85);
        assert!(pkg.contains(a));
        assert!(pkg.contains(b));
        assert!(!pkg.contains(c));
    }

    #[test]
    fn service_serde_roundtrip() {
        let svc = Service::new("haircut", 50);
        let json = serde_json::to_string(&svc).unwrap();
        let back: Service = serde_json::from_str(&json).unwrap();
        assert_eq!(svc, back);
    }
}
