//! # openescrow-settlement
//!
//! **Settlement plane**: the only code that moves money between
//! balances.
//!
//! ## Architecture
//!
//! 1. **Purchase**: splits exactly the price off the caller's wallet
//!    into a new bearer certificate — the only path that creates escrow
//! 2. **Settle**: redemption ("enjoy") and customer refund, with lazy
//!    cancellation detection against the live registry, member-service
//!    proration for packages, and the 10% self-refund fee
//! 3. **Withdraw**: organization income payout above the 100-unit floor
//!    with 1% platform commission, and the publisher's own payout
//! 4. **Conservation**: an audit ledger asserting the money-supply
//!    invariant after any operation sequence
//!
//! ## Settlement flow
//!
//! ```text
//! wallet → buy_*() → Certificate(held) → redeem_*/refund_*() → income / payout
//!                                        organization_withdraw() → wallet + commission
//! ```
//!
//! Certificates are consumed by value on every settlement path, so a
//! certificate can never be presented twice. Cancellation (organization,
//! service, or package destroyed since purchase) is a normal fee-free
//! success path, never an error.

pub mod conservation;
pub mod purchase;
pub mod settle;
pub mod withdraw;

pub use conservation::ConservationLedger;
pub use purchase::{buy_package, buy_service};
pub use settle::{
    SettlementOutcome, SettlementReceipt, redeem_package, redeem_service, refund_package,
    refund_service,
};
pub use withdraw::{organization_withdraw, publisher_withdraw};
