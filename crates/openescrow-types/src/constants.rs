//! System-wide constants for the OpenEscrow ledger.

/// Minimum organization income (in units) required for a withdrawal.
/// Applies per call, not cumulatively.
pub const WITHDRAW_FLOOR_UNITS: u64 = 100;

/// Platform commission divisor: `income / 100` (1%) is split off on
/// every organization withdrawal. May truncate to zero at the floor.
pub const COMMISSION_DIVISOR: u64 = 100;

/// Customer-initiated refund fee divisor: `held / 10` (10%) goes to the
/// organization as a cancellation fee.
pub const REFUND_FEE_DIVISOR: u64 = 10;

/// Default package price numerator: 85% of the member price sum.
pub const PACKAGE_DISCOUNT_NUMERATOR: u64 = 85;

/// Default package price denominator.
pub const PACKAGE_DISCOUNT_DENOMINATOR: u64 = 100;

/// A package with fewer members than this must not exist; reconciliation
/// destroys it in the same operation that drops it below the floor.
pub const MIN_PACKAGE_MEMBERS: usize = 2;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "OpenEscrow";
