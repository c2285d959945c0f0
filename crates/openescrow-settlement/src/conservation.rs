//! Money-supply conservation audit.
//!
//! Mathematical invariant over any operation sequence:
//! ```text
//! Σ organization incomes + platform income + Σ outstanding certificate
//! holdings == Σ units paid in − Σ units paid back out
//! ```
//!
//! The move-only `Balance` type makes violations unrepresentable in safe
//! code; this ledger is the belt-and-braces audit that proves it after
//! the fact. If it ever trips, something has gone catastrophically
//! wrong.

use openescrow_types::{EscrowError, Result};

/// Tracks units entering and leaving the ledger and validates the
/// outstanding total against it.
#[derive(Debug, Default)]
pub struct ConservationLedger {
    /// Units customers have paid in since genesis.
    paid_in: u64,
    /// Units paid back out to external wallets since genesis.
    paid_out: u64,
}

impl ConservationLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record units entering the ledger (a purchase payment).
    pub fn record_paid_in(&mut self, units: u64) {
        self.paid_in += units;
    }

    /// Record units leaving the ledger (refund payout, withdrawal,
    /// final payout on organization destruction).
    pub fn record_paid_out(&mut self, units: u64) {
        self.paid_out += units;
    }

    /// Units that must currently be held somewhere inside the system.
    #[must_use]
    pub fn expected_outstanding(&self) -> u64 {
        self.paid_in - self.paid_out
    }

    /// Verify the actual outstanding total (registry balances plus live
    /// certificate holdings) against the expectation.
    ///
    /// # Errors
    /// Returns `ConservationViolation` if the totals diverge.
    pub fn verify(&self, actual_outstanding: u64) -> Result<()> {
        let expected = self.expected_outstanding();
        if actual_outstanding != expected {
            return Err(EscrowError::ConservationViolation {
                expected,
                actual: actual_outstanding,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn total_paid_in(&self) -> u64 {
        self.paid_in
    }

    #[must_use]
    pub fn total_paid_out(&self) -> u64 {
        self.paid_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ledger_expects_zero() {
        let ledger = ConservationLedger::new();
        assert_eq!(ledger.expected_outstanding(), 0);
        assert!(ledger.verify(0).is_ok());
    }

    #[test]
    fn paid_in_raises_expectation() {
        let mut ledger = ConservationLedger::new();
        ledger.record_paid_in(85);
        ledger.record_paid_in(50);
        assert_eq!(ledger.expected_outstanding(), 135);
    }

    #[test]
    fn paid_out_lowers_expectation() {
        let mut ledger = ConservationLedger::new();
        ledger.record_paid_in(100);
        ledger.record_paid_out(45);
        assert_eq!(ledger.expected_outstanding(), 55);
        assert!(ledger.verify(55).is_ok());
    }

    #[test]
    fn divergence_is_flagged() {
        let mut ledger = ConservationLedger::new();
        ledger.record_paid_in(100);
        let err = ledger.verify(99).unwrap_err();
        assert!(matches!(
            err,
            EscrowError::ConservationViolation {
                expected: 100,
                actual: 99
            }
        ));
    }
}
