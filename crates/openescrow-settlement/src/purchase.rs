//! Purchase — the only path that creates escrow certificates.
//!
//! The buyer presents a wallet balance. Exactly the item's current price
//! is split off into the new certificate's held balance; any excess
//! never leaves the wallet. If any precondition fails the wallet is
//! untouched.

use openescrow_catalog::MarketRegistry;
use openescrow_types::{
    Balance, CertificateId, EscrowError, OrgId, PackageCertificate, PackageId, Result,
    ServiceCertificate, ServiceId,
};

/// Buy a single service, escrowing exactly its current price.
///
/// # Errors
/// - `UnknownOrganization` / `UnknownService` if the ids do not resolve
///   in the current catalog
/// - `InsufficientPayment` if the wallet holds less than the price
pub fn buy_service(
    registry: &mut MarketRegistry,
    organization: OrgId,
    service: ServiceId,
    wallet: &mut Balance,
) -> Result<ServiceCertificate> {
    let org = registry
        .organization(organization)
        .ok_or(EscrowError::UnknownOrganization(organization))?;
    let price = org
        .service(service)
        .ok_or(EscrowError::UnknownService(service))?
        .price;
    if wallet.amount() < price {
        return Err(EscrowError::InsufficientPayment {
            required: price,
            supplied: wallet.amount(),
        });
    }

    let held = wallet.split(price)?;
    let id = CertificateId::new();
    tracing::info!(certificate = %id, organization = %organization, service = %service, price, "service purchased");
    Ok(ServiceCertificate {
        id,
        organization,
        service,
        held,
    })
}

/// Buy a package, escrowing exactly its current price and snapshotting
/// its current member list. The snapshot is what settlement later
/// compares against the live catalog to prorate for removed members.
///
/// # Errors
/// - `UnknownOrganization` / `UnknownPackage` if the ids do not resolve
///   in the current catalog
/// - `InsufficientPayment` if the wallet holds less than the price
pub fn buy_package(
    registry: &mut MarketRegistry,
    organization: OrgId,
    package: PackageId,
    wallet: &mut Balance,
) -> Result<PackageCertificate> {
    let org = registry
        .organization(organization)
        .ok_or(EscrowError::UnknownOrganization(organization))?;
    let pkg = org
        .package(package)
        .ok_or(EscrowError::UnknownPackage(package))?;
    let price = pkg.price;
    let members = pkg.members.clone();
    if wallet.amount() < price {
        return Err(EscrowError::InsufficientPayment {
            required: price,
            supplied: wallet.amount(),
        });
    }

    let held = wallet.split(price)?;
    let id = CertificateId::new();
    tracing::info!(
        certificate = %id,
        organization = %organization,
        package = %package,
        price,
        members = members.len(),
        "package purchased"
    );
    Ok(PackageCertificate {
        id,
        organization,
        package,
        members,
        held,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (MarketRegistry, OrgId, ServiceId, ServiceId, PackageId) {
        let (mut registry, _publisher) = MarketRegistry::new();
        let cap = registry.create_organization("salon");
        let a = registry.create_service(&cap, "cut", 50).unwrap();
        let b = registry.create_service(&cap, "wash", 50).unwrap();
        let pkg = registry.create_package(&cap, vec![a, b], None).unwrap();
        (registry, cap.organization(), a, b, pkg)
    }

    #[test]
    fn buy_service_escrows_exact_price() {
        let (mut registry, org, a, _, _) = setup();
        let mut wallet = Balance::from_units(120);
        let cert = buy_service(&mut registry, org, a, &mut wallet).unwrap();
        assert_eq!(cert.held.amount(), 50);
        assert_eq!(wallet.amount(), 70);
        assert_eq!(cert.organization, org);
        assert_eq!(cert.service, a);
    }

    #[test]
    fn buy_service_insufficient_payment_leaves_wallet_untouched() {
        let (mut registry, org, a, _, _) = setup();
        let mut wallet = Balance::from_units(49);
        let err = buy_service(&mut registry, org, a, &mut wallet).unwrap_err();
        assert!(matches!(
            err,
            EscrowError::InsufficientPayment {
                required: 50,
                supplied: 49
            }
        ));
        assert_eq!(wallet.amount(), 49);
    }

    #[test]
    fn buy_service_unknown_ids() {
        let (mut registry, org, _, _, _) = setup();
        let mut wallet = Balance::from_units(100);
        let err = buy_service(&mut registry, OrgId::new(), ServiceId::new(), &mut wallet)
            .unwrap_err();
        assert!(matches!(err, EscrowError::UnknownOrganization(_)));
        let err = buy_service(&mut registry, org, ServiceId::new(), &mut wallet).unwrap_err();
        assert!(matches!(err, EscrowError::UnknownService(_)));
        assert_eq!(wallet.amount(), 100);
    }

    #[test]
    fn buy_package_snapshots_members() {
        let (mut registry, org, a, b, pkg) = setup();
        let mut wallet = Balance::from_units(85);
        let cert = buy_package(&mut registry, org, pkg, &mut wallet).unwrap();
        assert_eq!(cert.held.amount(), 85);
        assert!(wallet.is_zero());
        assert_eq!(cert.members, vec![a, b]);
    }

    #[test]
    fn buy_package_unknown_package() {
        let (mut registry, org, _, _, _) = setup();
        let mut wallet = Balance::from_units(100);
        let err = buy_package(&mut registry, org, PackageId::new(), &mut wallet).unwrap_err();
        assert!(matches!(err, EscrowError::UnknownPackage(_)));
    }

    #[test]
    fn free_service_needs_no_funds() {
        let (mut registry, _, _, _, _) = setup();
        let cap = registry.create_organization("gratis");
        let free = registry.create_service(&cap, "smile", 0).unwrap();
        let mut wallet = Balance::zero();
        let cert = buy_service(&mut registry, cap.organization(), free, &mut wallet).unwrap();
        assert!(cert.held.is_zero());
    }
}
