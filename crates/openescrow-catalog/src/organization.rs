//! One seller's catalog and accumulated income.
//!
//! Services and packages are rows in id-keyed tables with a separate
//! insertion-order index; deletion simply removes the row. Outstanding
//! certificates keep copies of the keys and detect deletions lazily at
//! settlement time, so no teardown here ever needs refund logic.

use std::collections::HashMap;

use openescrow_types::{
    Balance, EscrowError, Package, PackageId, Result, Service, ServiceId, constants,
};

/// A seller: services, packages, and income.
///
/// Mutators are crate-private — all mutation goes through the
/// capability-gated [`MarketRegistry`] methods. Income accessors are
/// public because the settlement plane credits and drains them.
///
/// [`MarketRegistry`]: crate::MarketRegistry
#[derive(Debug)]
pub struct Organization {
    name: String,
    services: HashMap<ServiceId, Service>,
    service_order: Vec<ServiceId>,
    packages: HashMap<PackageId, Package>,
    package_order: Vec<PackageId>,
    income: Balance,
}

impl Organization {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            services: HashMap::new(),
            service_order: Vec::new(),
            packages: HashMap::new(),
            package_order: Vec::new(),
            income: Balance::zero(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a service. `None` means it has been destroyed (or never
    /// existed) — the settlement plane treats that as a cancellation.
    #[must_use]
    pub fn service(&self, id: ServiceId) -> Option<&Service> {
        self.services.get(&id)
    }

    #[must_use]
    pub fn has_service(&self, id: ServiceId) -> bool {
        self.services.contains_key(&id)
    }

    #[must_use]
    pub fn package(&self, id: PackageId) -> Option<&Package> {
        self.packages.get(&id)
    }

    /// Services in insertion order.
    pub fn services(&self) -> impl Iterator<Item = (ServiceId, &Service)> {
        self.service_order
            .iter()
            .filter_map(|id| self.services.get(id).map(|s| (*id, s)))
    }

    /// Packages in insertion order.
    pub fn packages(&self) -> impl Iterator<Item = (PackageId, &Package)> {
        self.package_order
            .iter()
            .filter_map(|id| self.packages.get(id).map(|p| (*id, p)))
    }

    #[must_use]
    pub fn income_units(&self) -> u64 {
        self.income.amount()
    }

    /// Credit escrowed funds into this organization's income. The only
    /// mechanism that funds an organization is settlement calling this.
    pub fn credit_income(&mut self, funds: Balance) {
        self.income.merge(funds);
    }

    /// Drain the accumulated income, leaving zero.
    #[must_use]
    pub fn take_income(&mut self) -> Balance {
        self.income.take_all()
    }

    // -----------------------------------------------------------------
    // Crate-private catalog mutators (called by the registry)
    // -----------------------------------------------------------------

    pub(crate) fn insert_service(&mut self, id: ServiceId, service: Service) {
        self.services.insert(id, service);
        self.service_order.push(id);
    }

    pub(crate) fn remove_service(&mut self, id: ServiceId) -> Result<Service> {
        let service = self
            .services
            .remove(&id)
            .ok_or(EscrowError::UnknownService(id))?;
        self.service_order.retain(|s| *s != id);
        Ok(service)
    }

    /// Validate a package member list: at least the member floor, no
    /// duplicates, every id currently owned by this organization.
    pub(crate) fn validate_members(&self, members: &[ServiceId]) -> Result<()> {
        if members.len() < constants::MIN_PACKAGE_MEMBERS {
            return Err(EscrowError::InvalidMemberList {
                reason: format!(
                    "package requires at least {} members, got {}",
                    constants::MIN_PACKAGE_MEMBERS,
                    members.len()
                ),
            });
        }
        for (i, member) in members.iter().enumerate() {
            if members[..i].contains(member) {
                return Err(EscrowError::InvalidMemberList {
                    reason: format!("duplicate member {member}"),
                });
            }
            if !self.services.contains_key(member) {
                return Err(EscrowError::UnknownService(*member));
            }
        }
        Ok(())
    }

    pub(crate) fn insert_package(&mut self, id: PackageId, package: Package) {
        self.packages.insert(id, package);
        self.package_order.push(id);
    }

    /// Replace a package's member list. Shared validation path for both
    /// package creation and later modification.
    pub(crate) fn set_package_members(
        &mut self,
        id: PackageId,
        members: Vec<ServiceId>,
    ) -> Result<()> {
        if !self.packages.contains_key(&id) {
            return Err(EscrowError::UnknownPackage(id));
        }
        self.validate_members(&members)?;
        if let Some(package) = self.packages.get_mut(&id) {
            package.members = members;
        }
        Ok(())
    }

    pub(crate) fn set_package_price(&mut self, id: PackageId, price: u64) -> Result<()> {
        let package = self
            .packages
            .get_mut(&id)
            .ok_or(EscrowError::UnknownPackage(id))?;
        package.price = price;
        Ok(())
    }

    pub(crate) fn remove_package(&mut self, id: PackageId) -> Result<Package> {
        let package = self
            .packages
            .remove(&id)
            .ok_or(EscrowError::UnknownPackage(id))?;
        self.package_order.retain(|p| *p != id);
        Ok(package)
    }

    /// Reconcile packages after a service was destroyed.
    ///
    /// For every package that listed the removed service:
    /// 1. drop the id from the member list;
    /// 2. if the package still has enough members, shrink its price by
    ///    one "share" computed against the post-removal cardinality:
    ///    `price -= price / (count_after + 1)`. This heuristic is
    ///    customer-observable and must not be re-derived from member
    ///    prices;
    /// 3. otherwise destroy the package. Outstanding certificates are
    ///    handled lazily at settlement time.
    ///
    /// Returns the ids of packages that were destroyed.
    pub(crate) fn reconcile_packages(&mut self, removed: ServiceId) -> Vec<PackageId> {
        let mut destroyed = Vec::new();
        for id in self.package_order.clone() {
            let Some(package) = self.packages.get_mut(&id) else {
                continue;
            };
            if !package.contains(removed) {
                continue;
            }
            package.members.retain(|m| *m != removed);
            if package.members.len() >= constants::MIN_PACKAGE_MEMBERS {
                #[allow(clippy::cast_possible_truncation)]
                let share = package.price / (package.members.len() as u64 + 1);
                package.price -= share;
            } else {
                destroyed.push(id);
            }
        }
        for id in &destroyed {
            self.packages.remove(id);
            self.package_order.retain(|p| p != id);
        }
        destroyed
    }
}
