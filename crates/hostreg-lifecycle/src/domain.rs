//! # Domain Lifecycle
//!
//! Domain registrations have a fixed transition vocabulary
//! ([`DomainTransition`]) but no built-in table. The status set and the
//! legal moves between statuses belong to the integrating registrar
//! application, which supplies them either in code
//! ([`DomainLifecycle::from_rules`]) or from a table file
//! ([`load_domain_lifecycle`](crate::load_domain_lifecycle)).
//!
//! Statuses are opaque to the engine. [`DomainStatus`] only normalizes the
//! name so that `pending-transfer` and `PENDING_TRANSFER` are the same key.

use serde::{Deserialize, Serialize};

use hostreg_core::DomainId;

use crate::engine::Lifecycle;
use crate::names::{lifecycle_vocabulary, normalize};
use crate::record::TransitionRecord;

lifecycle_vocabulary! {
    /// Lifecycle events that can be requested for a domain registration.
    pub enum DomainTransition ("domain transition") {
        /// Submit a new registration to the registry.
        Register => "REGISTER",
        /// Registry confirmed the registration.
        Activate => "ACTIVATE",
        /// Take the domain out of service (abuse, non-payment).
        Suspend => "SUSPEND",
        /// Extend the registration period.
        Renew => "RENEW",
        /// Registration period ran out.
        Expire => "EXPIRE",
        /// Customer or registrar cancelled the registration.
        Cancel => "CANCEL",
        /// Inbound transfer from another registrar.
        TransferIn => "TRANSFER_IN",
        /// Outbound transfer to another registrar.
        TransferOut => "TRANSFER_OUT",
        /// Return a suspended or expired domain to service.
        Reactivate => "REACTIVATE",
    }
}

/// Entity label used in errors and logs.
pub const DOMAIN_ENTITY: &str = "domain";

/// Opaque domain status owned by the integrating application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainStatus(String);

impl DomainStatus {
    /// Normalize `name` into a status. Returns `None` for a blank name.
    pub fn new(name: &str) -> Option<Self> {
        let normalized = normalize(name);
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    /// The normalized name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DomainStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DomainStatus {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or("domain status must not be empty")
    }
}

impl From<DomainStatus> for String {
    fn from(status: DomainStatus) -> Self {
        status.0
    }
}

impl std::str::FromStr for DomainStatus {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("domain status must not be empty")
    }
}

/// Engine type for domain registrations.
pub type DomainLifecycle = Lifecycle<DomainStatus, DomainTransition>;

/// Record type produced by [`DomainLifecycle::apply`].
pub type DomainTransitionRecord = TransitionRecord<DomainId, DomainStatus, DomainTransition>;
