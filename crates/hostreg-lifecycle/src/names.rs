//! # State and Transition Names
//!
//! Bounds the engine places on state and transition types, plus the
//! `lifecycle_vocabulary!` macro that defines the closed vocabularies.
//!
//! Every member of a vocabulary has one canonical `SCREAMING_SNAKE_CASE`
//! name used for `Display` and serde. Parsing is lenient: case is ignored
//! and `-` or spaces stand in for `_`, so `mark-overdue` parses as
//! `MARK_OVERDUE`.

use std::fmt;
use std::hash::Hash;

/// A value usable as a table state: compared and hashed as a key, printed
/// in diagnostics.
pub trait LifecycleState: Clone + Eq + Hash + fmt::Debug + fmt::Display {}

impl<S> LifecycleState for S where S: Clone + Eq + Hash + fmt::Debug + fmt::Display {}

/// A value usable as a table transition verb.
pub trait LifecycleTransition: Copy + Eq + Hash + fmt::Debug + fmt::Display {}

impl<T> LifecycleTransition for T where T: Copy + Eq + Hash + fmt::Debug + fmt::Display {}

/// Normalize a user-supplied name to canonical form.
pub fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

/// Define a closed vocabulary enum with canonical names.
///
/// Generates the enum with the standard derives, an `ALL` constant in
/// declaration order, `name()`, `Display`, and a lenient `FromStr` that
/// fails with [`UnknownName`](crate::error::UnknownName).
macro_rules! lifecycle_vocabulary {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($kind:literal) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $label:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical name.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::UnknownName;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = $crate::names::normalize(s);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|member| member.name() == wanted)
                    .ok_or_else(|| $crate::error::UnknownName {
                        kind: $kind,
                        name: s.to_string(),
                    })
            }
        }
    };
}

pub(crate) use lifecycle_vocabulary;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_folds_case_and_separators() {
        assert_eq!(normalize("mark-overdue"), "MARK_OVERDUE");
        assert_eq!(normalize("  Transfer In "), "TRANSFER_IN");
        assert_eq!(normalize("PAID"), "PAID");
        assert_eq!(normalize(""), "");
    }
}
