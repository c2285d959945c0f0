//! # openescrow-catalog
//!
//! **Catalog plane**: the shared organization registry, capability-gated
//! catalog mutation, and package reconciliation.
//!
//! ## Architecture
//!
//! 1. **MarketRegistry**: the single shared root — all organizations,
//!    the platform's commission balance, and the advisory event log
//! 2. **Organization**: one seller's services, packages, and income
//! 3. **OrgCapability / PublisherCredential**: unforgeable authorization
//!    tokens minted exactly once, gating every privileged mutation
//!
//! ## Authorization model
//!
//! A capability's payload is the owned entity's identity; every
//! privileged call performs a registry lookup and treats a missing entry
//! as "authority revoked" rather than a crash. Losing a capability
//! permanently locks the organization's catalog — customers can still
//! buy and redeem, but nobody can administer it again.
//!
//! The host platform is responsible for serializing operations against
//! the registry (§ concurrency); each method here fully commits or fully
//! fails with no partial effect.

pub mod capability;
pub mod organization;
pub mod registry;

pub use capability::{OrgCapability, PublisherCredential};
pub use organization::Organization;
pub use registry::{MarketRegistry, OrganizationListing, PackageListing, ServiceListing};
