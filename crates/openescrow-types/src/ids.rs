//! Globally unique identifiers used throughout OpenEscrow.
//!
//! All entity IDs use UUIDv7: time-ordered, lexicographically sortable,
//! and uncorrelated with previously issued identities. Certificates and
//! capabilities carry these IDs as foreign keys into the registry; a
//! failed lookup means the referenced entity has been destroyed.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// OrgId
// ---------------------------------------------------------------------------

/// Unique identifier for an organization. Permanent once allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OrgId(pub Uuid);

impl OrgId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }
}

impl Default for OrgId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "org:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// ServiceId
// ---------------------------------------------------------------------------

/// Unique identifier for a single purchasable service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ServiceId(pub Uuid);

impl ServiceId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }
}

impl Default for ServiceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "svc:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// PackageId
// ---------------------------------------------------------------------------

/// Unique identifier for a bundled service package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct PackageId(pub Uuid);

impl PackageId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }
}

impl Default for PackageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pkg:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// CertificateId
// ---------------------------------------------------------------------------

/// Unique identifier for an escrow certificate (audit trail only — the
/// certificate itself is a bearer value, possession is the credential).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CertificateId(pub Uuid);

impl CertificateId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for CertificateId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CertificateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cert:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn org_id_uniqueness() {
        let a = OrgId::new();
        let b = OrgId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn service_id_ordering() {
        let a = ServiceId::new();
        let b = ServiceId::new();
        assert!(a < b);
    }

    #[test]
    fn display_prefixes() {
        assert!(OrgId::new().to_string().starts_with("org:"));
        assert!(ServiceId::new().to_string().starts_with("svc:"));
        assert!(PackageId::new().to_string().starts_with("pkg:"));
        assert!(CertificateId::new().to_string().starts_with("cert:"));
    }

    #[test]
    fn serde_roundtrips() {
        let oid = OrgId::new();
        let json = serde_json::to_string(&oid).unwrap();
        let back: OrgId = serde_json::from_str(&json).unwrap();
        assert_eq!(oid, back);

        let sid = ServiceId::new();
        let json = serde_json::to_string(&sid).unwrap();
        let back: ServiceId = serde_json::from_str(&json).unwrap();
        assert_eq!(sid, back);
    }
}
