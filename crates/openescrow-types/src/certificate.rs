//! Escrow certificates — bearer proof of prepayment.
//!
//! A certificate is created on purchase, holds the paid balance, and is
//! consumed exactly once by redemption or refund. Certificates are
//! deliberately **not** `Clone`: whoever holds the value holds the money,
//! and settlement entry points consume the certificate by value, so
//! single consumption is enforced by ownership rather than by a state
//! machine.
//!
//! Certificates carry copies of registry keys, not references. The
//! referenced organization, service, or package may be destroyed while
//! the certificate is outstanding; settlement detects that lazily and
//! refunds in full, fee-free.

use serde::{Deserialize, Serialize};

use crate::{Balance, CertificateId, OrgId, PackageId, ServiceId};

/// Escrow certificate for a single service purchase.
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceCertificate {
    pub id: CertificateId,
    pub organization: OrgId,
    pub service: ServiceId,
    /// The escrowed payment, exactly the price at purchase time.
    pub held: Balance,
}

/// Escrow certificate for a package purchase.
///
/// `members` is a snapshot of the package's member list taken at purchase
/// time, independent of the live package. Settlement compares the
/// snapshot against the live organization to detect members that were
/// individually removed after the sale, and prorates for them.
#[derive(Debug, Serialize, Deserialize)]
pub struct PackageCertificate {
    pub id: CertificateId,
    pub organization: OrgId,
    pub package: PackageId,
    pub members: Vec<ServiceId>,
    pub held: Balance,
}
