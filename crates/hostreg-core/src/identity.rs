//! # Entity Identifiers
//!
//! Newtype wrappers for the registrar entities whose status the lifecycle
//! engine drives. Distinct types keep an [`InvoiceId`] from being recorded
//! against a domain and vice versa.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::HostregError;

/// Identifier of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvoiceId(pub Uuid);

/// Identifier of a domain registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DomainId(pub Uuid);

macro_rules! impl_uuid_id {
    ($ty:ident, $prefix:literal) => {
        impl $ty {
            /// Generate a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Access the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }

        /// Accepts a bare UUID or the prefixed display form.
        impl FromStr for $ty {
            type Err = HostregError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s.strip_prefix(concat!($prefix, ":")).unwrap_or(s);
                Uuid::parse_str(raw).map(Self).map_err(|e| {
                    HostregError::Validation(format!(
                        concat!("invalid ", $prefix, " id {:?}: {}"),
                        s, e
                    ))
                })
            }
        }
    };
}

impl_uuid_id!(InvoiceId, "invoice");
impl_uuid_id!(DomainId, "domain");
