//! Unforgeable authorization tokens.
//!
//! A capability's only payload is the identity of the entity it governs.
//! Unforgeability is structural: the field is private, the constructors
//! are crate-private, and the types are neither `Clone` nor
//! serializable, so the only way to hold one is to have received it from
//! the registry at creation time. Possession is necessary and sufficient
//! to mutate the corresponding organization.

use openescrow_types::OrgId;

/// Authorization capability for one organization.
///
/// Minted exactly once, by [`MarketRegistry::create_organization`], and
/// handed to the creator. Destroying the organization consumes it.
///
/// [`MarketRegistry::create_organization`]: crate::MarketRegistry::create_organization
#[derive(Debug)]
pub struct OrgCapability {
    organization: OrgId,
}

impl OrgCapability {
    pub(crate) fn issue(organization: OrgId) -> Self {
        Self { organization }
    }

    /// The identity of the organization this capability governs.
    #[must_use]
    pub fn organization(&self) -> OrgId {
        self.organization
    }
}

/// The platform publisher's own credential, gating commission withdrawal.
///
/// Minted exactly once, by [`MarketRegistry::new`].
///
/// [`MarketRegistry::new`]: crate::MarketRegistry::new
#[derive(Debug)]
pub struct PublisherCredential {
    _priv: (),
}

impl PublisherCredential {
    pub(crate) fn issue() -> Self {
        Self { _priv: () }
    }
}
