//! The `Balance` type — the ledger's unit of escrowed money.
//!
//! A `Balance` is an opaque non-negative unit count that is deliberately
//! **not** `Clone` or `Copy`: within this workspace money can only be
//! moved, split, or merged, never duplicated. Units enter the system
//! through [`Balance::from_units`] and leave it through
//! [`Balance::into_units`] — the lossless conversion boundary to the host
//! platform's currency carrier. Everything in between conserves the total.

use serde::{Deserialize, Serialize};

use crate::{EscrowError, Result};

/// A move-only unit count. The sum of all `Balance` values held anywhere
/// (organization incomes, platform income, outstanding certificates,
/// caller wallets) is invariant under every ledger operation.
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    units: u64,
}

impl Balance {
    /// An empty balance.
    #[must_use]
    pub fn zero() -> Self {
        Self { units: 0 }
    }

    /// Mint a balance from external currency units. This is the only
    /// way units enter the ledger.
    #[must_use]
    pub fn from_units(units: u64) -> Self {
        Self { units }
    }

    /// Pay the balance out to the external carrier, consuming it.
    #[must_use]
    pub fn into_units(self) -> u64 {
        self.units
    }

    /// Current unit count.
    #[must_use]
    pub fn amount(&self) -> u64 {
        self.units
    }

    /// Whether this balance holds nothing.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.units == 0
    }

    /// Split off exactly `units` into a new balance.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if `units` exceeds the balance.
    /// On failure the balance is unchanged.
    pub fn split(&mut self, units: u64) -> Result<Self> {
        if units > self.units {
            return Err(EscrowError::InsufficientBalance {
                needed: units,
                available: self.units,
            });
        }
        self.units -= units;
        Ok(Self { units })
    }

    /// Split off `amount / divisor` (integer truncation). Used for the
    /// refund fee (`divisor = 10`) and the platform commission
    /// (`divisor = 100`); may split off zero.
    ///
    /// # Panics
    /// Panics if `divisor` is zero.
    #[must_use]
    pub fn split_div(&mut self, divisor: u64) -> Self {
        assert!(divisor > 0, "Balance::split_div divisor must be > 0");
        let units = self.units / divisor;
        self.units -= units;
        Self { units }
    }

    /// Split off `shares` of `shares_total` equal shares, truncating:
    /// `(amount / shares_total) * shares`. The truncation dust stays
    /// behind in `self`. Used for package member proration.
    ///
    /// # Panics
    /// Panics if `shares_total` is zero or `shares > shares_total`.
    #[must_use]
    pub fn split_shares(&mut self, shares_total: u64, shares: u64) -> Self {
        assert!(shares_total > 0, "Balance::split_shares total must be > 0");
        assert!(shares <= shares_total, "shares must not exceed total");
        let units = (self.units / shares_total) * shares;
        self.units -= units;
        Self { units }
    }

    /// Absorb another balance, consuming it.
    ///
    /// # Panics
    /// Panics if the combined units exceed `u64::MAX`; wrapping here
    /// would destroy money.
    pub fn merge(&mut self, other: Self) {
        let (total, overflow) = self.units.overflowing_add(other.units);
        assert!(!overflow, "Balance::merge overflow");
        self.units = total;
    }

    /// Withdraw everything, leaving zero behind.
    #[must_use]
    pub fn take_all(&mut self) -> Self {
        Self {
            units: std::mem::take(&mut self.units),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_zero() {
        let b = Balance::zero();
        assert!(b.is_zero());
        assert_eq!(b.amount(), 0);
    }

    #[test]
    fn split_moves_exact_amount() {
        let mut b = Balance::from_units(100);
        let part = b.split(30).unwrap();
        assert_eq!(part.amount(), 30);
        assert_eq!(b.amount(), 70);
    }

    #[test]
    fn split_insufficient_leaves_balance_unchanged() {
        let mut b = Balance::from_units(50);
        let err = b.split(51).unwrap_err();
        assert!(matches!(err, EscrowError::InsufficientBalance { .. }));
        assert_eq!(b.amount(), 50);
    }

    #[test]
    fn split_div_truncates() {
        let mut b = Balance::from_units(85);
        let fee = b.split_div(10);
        assert_eq!(fee.amount(), 8);
        assert_eq!(b.amount(), 77);
    }

    #[test]
    fn split_div_can_be_zero_at_boundary() {
        let mut b = Balance::from_units(99);
        let commission = b.split_div(100);
        assert_eq!(commission.amount(), 0);
        assert_eq!(b.amount(), 99);
    }

    #[test]
    fn split_shares_leaves_dust() {
        let mut b = Balance::from_units(85);
        let prorated = b.split_shares(2, 1);
        assert_eq!(prorated.amount(), 42);
        assert_eq!(b.amount(), 43);
    }

    #[test]
    fn split_shares_all_shares() {
        let mut b = Balance::from_units(85);
        let prorated = b.split_shares(3, 3);
        // 85/3 = 28 per share; dust of 1 stays behind.
        assert_eq!(prorated.amount(), 84);
        assert_eq!(b.amount(), 1);
    }

    #[test]
    fn merge_conserves_total() {
        let mut a = Balance::from_units(60);
        let b = Balance::from_units(40);
        a.merge(b);
        assert_eq!(a.amount(), 100);
    }

    #[test]
    fn take_all_empties() {
        let mut a = Balance::from_units(77);
        let taken = a.take_all();
        assert_eq!(taken.amount(), 77);
        assert!(a.is_zero());
    }

    #[test]
    fn split_then_merge_roundtrips() {
        let mut a = Balance::from_units(1000);
        let part = a.split(333).unwrap();
        a.merge(part);
        assert_eq!(a.amount(), 1000);
    }

    #[test]
    #[should_panic(expected = "merge overflow")]
    fn merge_overflow_panics() {
        let mut a = Balance::from_units(u64::MAX);
        a.merge(Balance::from_units(1));
    }

    #[test]
    #[should_panic(expected = "divisor must be > 0")]
    fn split_div_zero_divisor_panics() {
        let mut b = Balance::from_units(10);
        let _ = b.split_div(0);
    }

    #[test]
    fn serde_roundtrip() {
        let b = Balance::from_units(12345);
        let json = serde_json::to_string(&b).unwrap();
        let back: Balance = serde_json::from_str(&json).unwrap();
        assert_eq!(b, back);
    }
}
