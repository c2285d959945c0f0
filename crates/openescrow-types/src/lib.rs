//! # openescrow-types
//!
//! Shared types for the **OpenEscrow** marketplace ledger.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`OrgId`], [`ServiceId`], [`PackageId`], [`CertificateId`]
//! - **Money**: [`Balance`] — a move-only, conservation-enforcing unit count
//! - **Catalog records**: [`Service`], [`Package`]
//! - **Escrow certificates**: [`ServiceCertificate`], [`PackageCertificate`]
//! - **Events**: [`MarketEvent`], [`MarketNotice`], [`RefundReason`]
//! - **Errors**: [`EscrowError`] with `OE_ERR_` prefix codes
//! - **Constants**: fee divisors, withdrawal floor, package rules

pub mod balance;
pub mod catalog;
pub mod certificate;
pub mod constants;
pub mod error;
pub mod event;
pub mod ids;

// Re-export all primary types at crate root for ergonomic imports:
//   use openescrow_types::{Balance, Service, ServiceCertificate, ...};

pub use balance::*;
pub use catalog::*;
pub use certificate::*;
pub use error::*;
pub use event::*;
pub use ids::*;

// Constants are accessed via `openescrow_types::constants::FOO`
// (not re-exported to avoid name collisions).
