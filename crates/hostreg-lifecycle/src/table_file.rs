//! # Domain Table Files
//!
//! Integrators describe their domain lifecycle in a YAML (or JSON) file:
//!
//! ```yaml
//! entity: domain
//! rules:
//!   - from: PENDING_REGISTRATION
//!     transition: ACTIVATE
//!     to: ACTIVE
//! ```
//!
//! Status names are opaque and normalized; transition names must belong to
//! [`DomainTransition`]. Errors name the zero-based index of the offending
//! rule.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainLifecycle, DomainStatus, DomainTransition, DOMAIN_ENTITY};
use crate::error::TableError;
use crate::table::TransitionRule;

/// On-disk shape of a domain table file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainTableFile {
    /// Informational label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    /// Rules as written.
    pub rules: Vec<RawRule>,
}

/// A rule before name resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawRule {
    /// Source status name.
    pub from: String,
    /// Transition name.
    pub transition: String,
    /// Target status name.
    pub to: String,
}

impl DomainTableFile {
    /// Resolve names and build the engine.
    ///
    /// # Errors
    ///
    /// [`TableError::EmptyState`], [`TableError::UnknownName`], or
    /// [`TableError::DuplicateRule`].
    pub fn into_lifecycle(self) -> Result<DomainLifecycle, TableError> {
        let mut rules = Vec::with_capacity(self.rules.len());
        for (index, raw) in self.rules.into_iter().enumerate() {
            let from = DomainStatus::new(&raw.from).ok_or(TableError::EmptyState { index })?;
            let to = DomainStatus::new(&raw.to).ok_or(TableError::EmptyState { index })?;
            let transition: DomainTransition = raw
                .transition
                .parse()
                .map_err(|source| TableError::UnknownName { index, source })?;
            rules.push(TransitionRule::new(from, transition, to));
        }
        DomainLifecycle::from_rules(DOMAIN_ENTITY, rules)
    }
}

/// Parse a domain table from YAML or JSON text.
///
/// # Errors
///
/// [`TableError::Parse`] for malformed text, otherwise see
/// [`DomainTableFile::into_lifecycle`].
pub fn parse_domain_lifecycle(text: &str) -> Result<DomainLifecycle, TableError> {
    let file: DomainTableFile = serde_yaml::from_str(text)?;
    file.into_lifecycle()
}

/// Read and parse a domain table file.
///
/// # Errors
///
/// [`TableError::Read`] if the file cannot be read, otherwise see
/// [`parse_domain_lifecycle`].
pub fn load_domain_lifecycle(path: &Path) -> Result<DomainLifecycle, TableError> {
    let text = std::fs::read_to_string(path).map_err(|source| TableError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let lifecycle = parse_domain_lifecycle(&text)?;
    tracing::debug!(
        path = %path.display(),
        rules = lifecycle.table().len(),
        "loaded domain lifecycle table"
    );
    Ok(lifecycle)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = "\
entity: domain
rules:
  - from: pending
    transition: activate
    to: active
  - from: active
    transition: transfer-out
    to: transferred
";

    fn status(name: &str) -> DomainStatus {
        DomainStatus::new(name).unwrap()
    }

    #[test]
    fn parses_yaml() {
        let lifecycle = parse_domain_lifecycle(FIXTURE).unwrap();
        assert_eq!(lifecycle.table().len(), 2);
        assert_eq!(
            lifecycle
                .transition(&status("ACTIVE"), DomainTransition::TransferOut)
                .unwrap(),
            status("TRANSFERRED")
        );
    }

    #[test]
    fn parses_json() {
        let json = r#"{"rules":[{"from":"A","transition":"RENEW","to":"A"}]}"#;
        let lifecycle = parse_domain_lifecycle(json).unwrap();
        assert!(lifecycle.can_transition(&status("a"), DomainTransition::Renew));
    }

    #[test]
    fn unknown_transition_names_rule_index() {
        let text = "rules:\n  - {from: A, transition: ACTIVATE, to: B}\n  - {from: B, transition: PARK, to: C}\n";
        let err = parse_domain_lifecycle(text).unwrap_err();
        assert!(matches!(err, TableError::UnknownName { index: 1, .. }), "{err:?}");
        assert!(err.to_string().contains("PARK"));
    }

    #[test]
    fn blank_status_rejected() {
        let text = "rules:\n  - {from: '', transition: ACTIVATE, to: B}\n";
        let err = parse_domain_lifecycle(text).unwrap_err();
        assert!(matches!(err, TableError::EmptyState { index: 0 }));
    }

    #[test]
    fn duplicate_after_normalization_rejected() {
        let text = "rules:\n  - {from: on-hold, transition: CANCEL, to: X}\n  - {from: ON_HOLD, transition: cancel, to: Y}\n";
        let err = parse_domain_lifecycle(text).unwrap_err();
        assert!(matches!(err, TableError::DuplicateRule { index: 1, .. }));
    }

    #[test]
    fn unknown_field_rejected() {
        let text = "rules:\n  - {from: A, transition: RENEW, to: A, guard: paid}\n";
        assert!(matches!(
            parse_domain_lifecycle(text),
            Err(TableError::Parse(_))
        ));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("domain.yaml");
        std::fs::write(&path, FIXTURE).unwrap();
        let lifecycle = load_domain_lifecycle(&path).unwrap();
        assert_eq!(lifecycle.entity(), "domain");
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_domain_lifecycle(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, TableError::Read { .. }));
    }
}
