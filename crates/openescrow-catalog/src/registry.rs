//! The single shared market registry.
//!
//! Exactly one `MarketRegistry` exists for the system's lifetime. It is
//! the transaction boundary: the host platform serializes calls against
//! it, and every method either fully commits or fails before mutating
//! anything. Privileged mutation requires the organization's capability;
//! the read surface is open to any caller.

use std::collections::HashMap;

use openescrow_types::{
    Balance, EscrowError, MarketEvent, MarketNotice, OrgId, Package, PackageId, Result, Service,
    ServiceId, constants,
};
use serde::{Deserialize, Serialize};

use crate::capability::{OrgCapability, PublisherCredential};
use crate::organization::Organization;

/// Read-surface row: one organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationListing {
    pub id: OrgId,
    pub name: String,
}

/// Read-surface row: one purchasable service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceListing {
    pub id: ServiceId,
    pub name: String,
    pub price: u64,
}

/// Read-surface row: one purchasable package, with member names resolved
/// against the live catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageListing {
    pub id: PackageId,
    pub member_names: Vec<String>,
    pub price: u64,
}

/// The shared root: all organizations plus the platform's commission
/// balance and the advisory event log.
#[derive(Debug)]
pub struct MarketRegistry {
    organizations: HashMap<OrgId, Organization>,
    organization_order: Vec<OrgId>,
    platform_income: Balance,
    events: Vec<MarketEvent>,
}

impl MarketRegistry {
    /// Create the registry and mint the platform's publisher credential.
    /// Called exactly once by the host platform.
    #[must_use]
    pub fn new() -> (Self, PublisherCredential) {
        let registry = Self {
            organizations: HashMap::new(),
            organization_order: Vec::new(),
            platform_income: Balance::zero(),
            events: Vec::new(),
        };
        (registry, PublisherCredential::issue())
    }

    // -----------------------------------------------------------------
    // Capability-gated catalog mutation
    // -----------------------------------------------------------------

    /// Register a new organization with an empty catalog and zero
    /// income. The returned capability is minted exactly once; losing it
    /// permanently locks the catalog for administration.
    pub fn create_organization(&mut self, name: impl Into<String>) -> OrgCapability {
        let name = name.into();
        let org_id = OrgId::new();
        self.organizations
            .insert(org_id, Organization::new(name.clone()));
        self.organization_order.push(org_id);
        tracing::info!(organization = %org_id, name = %name, "organization listed");
        self.record_event(MarketNotice::OrganizationListed {
            organization: org_id,
            name,
        });
        OrgCapability::issue(org_id)
    }

    /// Remove an organization, consuming its capability.
    ///
    /// If income has reached the withdrawal floor this performs a
    /// withdrawal-with-commission first; otherwise the full income is
    /// paid to the capability holder. All services and packages are
    /// dropped; outstanding certificates settle lazily as cancellations.
    pub fn destroy_organization(&mut self, cap: OrgCapability) -> Result<Balance> {
        let org_id = cap.organization();
        let mut org = self
            .organizations
            .remove(&org_id)
            .ok_or(EscrowError::UnknownOrganization(org_id))?;
        self.organization_order.retain(|o| *o != org_id);

        let mut payout = org.take_income();
        let mut commission_units = 0;
        if payout.amount() >= constants::WITHDRAW_FLOOR_UNITS {
            let commission = payout.split_div(constants::COMMISSION_DIVISOR);
            commission_units = commission.amount();
            self.platform_income.merge(commission);
        }
        tracing::info!(
            organization = %org_id,
            payout = payout.amount(),
            commission = commission_units,
            "organization destroyed"
        );
        if !payout.is_zero() || commission_units > 0 {
            self.record_event(MarketNotice::WithdrawalPaid {
                organization: Some(org_id),
                amount: payout.amount(),
                commission: commission_units,
            });
        }
        Ok(payout)
    }

    /// Append a new service to the organization's catalog.
    pub fn create_service(
        &mut self,
        cap: &OrgCapability,
        name: impl Into<String>,
        price: u64,
    ) -> Result<ServiceId> {
        let name = name.into();
        let org_id = cap.organization();
        let org = self.organization_gated(cap)?;
        let service_id = ServiceId::new();
        org.insert_service(service_id, Service::new(name.clone(), price));
        tracing::info!(organization = %org_id, service = %service_id, price, "service listed");
        self.record_event(MarketNotice::ServiceListed {
            organization: org_id,
            service: service_id,
            name,
            price,
        });
        Ok(service_id)
    }

    /// Remove a service, then reconcile every package that listed it.
    pub fn destroy_service(&mut self, cap: &OrgCapability, service: ServiceId) -> Result<()> {
        let org_id = cap.organization();
        let org = self.organization_gated(cap)?;
        org.remove_service(service)?;
        let destroyed = org.reconcile_packages(service);
        tracing::info!(
            organization = %org_id,
            service = %service,
            packages_destroyed = destroyed.len(),
            "service destroyed"
        );
        Ok(())
    }

    /// Create a package over existing services. Without an explicit
    /// price, the 85% default applies. Validation and population share
    /// the member-replacement path used by [`modify_package_members`].
    ///
    /// [`modify_package_members`]: MarketRegistry::modify_package_members
    pub fn create_package(
        &mut self,
        cap: &OrgCapability,
        members: Vec<ServiceId>,
        price: Option<u64>,
    ) -> Result<PackageId> {
        let org_id = cap.organization();
        let org = self.organization_gated(cap)?;
        org.validate_members(&members)?;

        let price = price.unwrap_or_else(|| {
            Package::default_price(members.iter().filter_map(|m| org.service(*m)).map(|s| s.price))
        });
        let member_names: Vec<String> = members
            .iter()
            .filter_map(|m| org.service(*m))
            .map(|s| s.name.clone())
            .collect();

        let package_id = PackageId::new();
        org.insert_package(package_id, Package::new(Vec::new(), price));
        org.set_package_members(package_id, members)?;

        tracing::info!(organization = %org_id, package = %package_id, price, "package listed");
        self.record_event(MarketNotice::PackageListed {
            organization: org_id,
            package: package_id,
            member_names,
            price,
        });
        Ok(package_id)
    }

    /// Replace a package's member list. Pricing is caller-controlled —
    /// no incremental repricing happens here.
    pub fn modify_package_members(
        &mut self,
        cap: &OrgCapability,
        package: PackageId,
        members: Vec<ServiceId>,
    ) -> Result<()> {
        let org = self.organization_gated(cap)?;
        org.set_package_members(package, members)
    }

    /// Set a package's price explicitly.
    pub fn modify_package_price(
        &mut self,
        cap: &OrgCapability,
        package: PackageId,
        price: u64,
    ) -> Result<()> {
        let org = self.organization_gated(cap)?;
        org.set_package_price(package, price)
    }

    /// Replace members and price together. Fails atomically: nothing
    /// changes unless both parts validate.
    pub fn modify_package(
        &mut self,
        cap: &OrgCapability,
        package: PackageId,
        members: Vec<ServiceId>,
        price: u64,
    ) -> Result<()> {
        let org = self.organization_gated(cap)?;
        if org.package(package).is_none() {
            return Err(EscrowError::UnknownPackage(package));
        }
        org.validate_members(&members)?;
        org.set_package_members(package, members)?;
        org.set_package_price(package, price)
    }

    /// Remove a package. Outstanding certificates against it are handled
    /// lazily at settlement time.
    pub fn destroy_package(&mut self, cap: &OrgCapability, package: PackageId) -> Result<()> {
        let org = self.organization_gated(cap)?;
        org.remove_package(package).map(|_| ())
    }

    fn organization_gated(&mut self, cap: &OrgCapability) -> Result<&mut Organization> {
        let org_id = cap.organization();
        self.organizations
            .get_mut(&org_id)
            .ok_or(EscrowError::UnknownOrganization(org_id))
    }

    // -----------------------------------------------------------------
    // Read surface (no capability required)
    // -----------------------------------------------------------------

    /// All organizations in registration order.
    #[must_use]
    pub fn list_organizations(&self) -> Vec<OrganizationListing> {
        self.organization_order
            .iter()
            .filter_map(|id| self.organizations.get(id).map(|org| (id, org)))
            .map(|(id, org)| OrganizationListing {
                id: *id,
                name: org.name().to_string(),
            })
            .collect()
    }

    /// An organization's services in listing order.
    pub fn list_services(&self, organization: OrgId) -> Result<Vec<ServiceListing>> {
        let org = self
            .organizations
            .get(&organization)
            .ok_or(EscrowError::UnknownOrganization(organization))?;
        Ok(org
            .services()
            .map(|(id, service)| ServiceListing {
                id,
                name: service.name.clone(),
                price: service.price,
            })
            .collect())
    }

    /// An organization's packages in listing order, member names
    /// resolved against the live catalog.
    pub fn list_packages(&self, organization: OrgId) -> Result<Vec<PackageListing>> {
        let org = self
            .organizations
            .get(&organization)
            .ok_or(EscrowError::UnknownOrganization(organization))?;
        Ok(org
            .packages()
            .map(|(id, package)| PackageListing {
                id,
                member_names: package
                    .members
                    .iter()
                    .filter_map(|m| org.service(*m))
                    .map(|s| s.name.clone())
                    .collect(),
                price: package.price,
            })
            .collect())
    }

    // -----------------------------------------------------------------
    // Settlement-facing accessors
    // -----------------------------------------------------------------

    #[must_use]
    pub fn organization(&self, id: OrgId) -> Option<&Organization> {
        self.organizations.get(&id)
    }

    #[must_use]
    pub fn organization_mut(&mut self, id: OrgId) -> Option<&mut Organization> {
        self.organizations.get_mut(&id)
    }

    /// Merge a commission payment into the platform's balance.
    pub fn credit_platform(&mut self, commission: Balance) {
        self.platform_income.merge(commission);
    }

    /// Drain the platform's commission balance.
    #[must_use]
    pub fn take_platform_income(&mut self) -> Balance {
        self.platform_income.take_all()
    }

    #[must_use]
    pub fn platform_income_units(&self) -> u64 {
        self.platform_income.amount()
    }

    /// Sum of all balances held inside the registry (organization
    /// incomes plus platform income). Outstanding certificates are held
    /// by their bearers and are not included.
    #[must_use]
    pub fn total_registry_balance(&self) -> u64 {
        let incomes: u64 = self.organizations.values().map(Organization::income_units).sum();
        incomes + self.platform_income.amount()
    }

    /// Record an advisory event (also mirrored by the emitting caller's
    /// tracing span).
    pub fn record_event(&mut self, notice: MarketNotice) {
        self.events.push(MarketEvent::now(notice));
    }

    /// Drain the advisory event log for external indexing.
    #[must_use]
    pub fn drain_events(&mut self) -> Vec<MarketEvent> {
        std::mem::take(&mut self.events)
    }
}
