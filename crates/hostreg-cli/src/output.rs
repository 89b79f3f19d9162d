//! # Lifecycle Command Output
//!
//! The four lifecycle queries shared by the `invoice` and `domain`
//! subcommands, rendered as text or JSON. Handlers write to any
//! `io::Write` so tests can capture output.

use std::io::Write;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::json;

use hostreg_lifecycle::{Lifecycle, LifecycleState, LifecycleTransition};

use crate::EXIT_REJECTED;

/// Output rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON document.
    Json,
}

/// Report whether `transition` is legal from `from`. Exits 0 or 2.
pub fn check<S, T>(
    lifecycle: &Lifecycle<S, T>,
    from: &S,
    transition: T,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<u8>
where
    S: LifecycleState + Serialize,
    T: LifecycleTransition + Serialize,
{
    let allowed = lifecycle.can_transition(from, transition);
    let to = lifecycle.table().lookup(from, transition);
    match format {
        OutputFormat::Text => match to {
            Some(to) => writeln!(out, "allowed: {from} --{transition}--> {to}")?,
            None => writeln!(out, "rejected: {from} --{transition}-->")?,
        },
        OutputFormat::Json => {
            let doc = json!({
                "entity": lifecycle.entity(),
                "from": from,
                "transition": transition,
                "allowed": allowed,
                "to": to,
            });
            writeln!(out, "{doc}")?;
        }
    }
    Ok(if allowed { 0 } else { EXIT_REJECTED })
}

/// Apply `transition` and print the new state, or a record when a subject
/// id is given. Exits 2 on rejection.
pub fn apply<S, T, I>(
    lifecycle: &Lifecycle<S, T>,
    subject: Option<&I>,
    from: &S,
    transition: T,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<u8>
where
    S: LifecycleState + Serialize,
    T: LifecycleTransition + Serialize,
    I: Clone + std::fmt::Display + Serialize,
{
    let result = match subject {
        Some(id) => lifecycle.apply(id, from, transition).map(|record| {
            match format {
                OutputFormat::Text => record.to_string(),
                OutputFormat::Json => json!(record).to_string(),
            }
        }),
        None => lifecycle.transition(from, transition).map(|to| match format {
            OutputFormat::Text => to.to_string(),
            OutputFormat::Json => json!({
                "from": from,
                "transition": transition,
                "to": to,
            })
            .to_string(),
        }),
    };

    match result {
        Ok(line) => {
            writeln!(out, "{line}")?;
            Ok(0)
        }
        Err(err) => {
            match format {
                OutputFormat::Text => writeln!(out, "error: {err}")?,
                OutputFormat::Json => writeln!(
                    out,
                    "{}",
                    json!({
                        "error": "invalid_transition",
                        "entity": err.entity,
                        "from": err.from,
                        "transition": err.transition,
                        "message": err.to_string(),
                    })
                )?,
            }
            Ok(EXIT_REJECTED)
        }
    }
}

/// List the transitions legal from `from`.
pub fn transitions<S, T>(
    lifecycle: &Lifecycle<S, T>,
    from: &S,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<u8>
where
    S: LifecycleState + Serialize,
    T: LifecycleTransition + Serialize,
{
    let verbs = lifecycle.valid_transitions(from);
    match format {
        OutputFormat::Text => {
            if verbs.is_empty() {
                writeln!(out, "{from}: no transitions (terminal)")?;
            }
            for verb in &verbs {
                writeln!(out, "{verb}")?;
            }
        }
        OutputFormat::Json => writeln!(out, "{}", json!({ "from": from, "transitions": verbs }))?,
    }
    Ok(0)
}

/// Print every rule of the table.
pub fn table<S, T>(lifecycle: &Lifecycle<S, T>, format: OutputFormat, out: &mut dyn Write) -> Result<u8>
where
    S: LifecycleState + Serialize,
    T: LifecycleTransition + Serialize,
{
    match format {
        OutputFormat::Text => {
            for rule in lifecycle.rules() {
                writeln!(out, "{rule}")?;
            }
        }
        OutputFormat::Json => {
            let rules: Vec<_> = lifecycle.rules().collect();
            writeln!(
                out,
                "{}",
                json!({ "entity": lifecycle.entity(), "rules": rules })
            )?;
        }
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use hostreg_core::InvoiceId;
    use hostreg_lifecycle::{invoice_lifecycle, InvoiceState, InvoiceTransition};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    /// Counts every event that reaches the subscriber.
    struct EventCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for EventCounter {
        fn on_event(&self, _event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn count_events(f: impl FnOnce()) -> usize {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(EventCounter(Arc::clone(&count)));
        tracing::subscriber::with_default(subscriber, f);
        count.load(Ordering::SeqCst)
    }

    fn capture(f: impl FnOnce(&mut dyn Write) -> Result<u8>) -> (u8, String) {
        let mut buf = Vec::new();
        let code = f(&mut buf).unwrap();
        (code, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn check_text_allowed_and_rejected() {
        let lc = invoice_lifecycle();
        let (code, text) = capture(|out| {
            check(lc, &InvoiceState::Draft, InvoiceTransition::Send, OutputFormat::Text, out)
        });
        assert_eq!(code, 0);
        assert_eq!(text, "allowed: DRAFT --SEND--> ISSUED\n");

        let (code, text) = capture(|out| {
            check(lc, &InvoiceState::Draft, InvoiceTransition::Pay, OutputFormat::Text, out)
        });
        assert_eq!(code, EXIT_REJECTED);
        assert_eq!(text, "rejected: DRAFT --PAY-->\n");
    }

    #[test]
    fn check_rejection_does_not_log() {
        let lc = invoice_lifecycle();
        let events = count_events(|| {
            let (code, text) = capture(|out| {
                check(lc, &InvoiceState::Paid, InvoiceTransition::Pay, OutputFormat::Json, out)
            });
            assert_eq!(code, EXIT_REJECTED);
            let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
            assert_eq!(doc["allowed"], false);
            assert!(doc["to"].is_null());
        });
        assert_eq!(events, 0);

        // A rejected transition() on the engine does log, so the counter works.
        let events = count_events(|| {
            assert!(lc.transition(&InvoiceState::Paid, InvoiceTransition::Pay).is_err());
        });
        assert_eq!(events, 1);
    }

    #[test]
    fn check_json_shape() {
        let (_, text) = capture(|out| {
            check(
                invoice_lifecycle(),
                &InvoiceState::Issued,
                InvoiceTransition::MarkOverdue,
                OutputFormat::Json,
                out,
            )
        });
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(doc["entity"], "invoice");
        assert_eq!(doc["allowed"], true);
        assert_eq!(doc["to"], "OVERDUE");
    }

    #[test]
    fn apply_without_subject_prints_state() {
        let (code, text) = capture(|out| {
            apply::<_, _, InvoiceId>(
                invoice_lifecycle(),
                None,
                &InvoiceState::Paid,
                InvoiceTransition::Refund,
                OutputFormat::Text,
                out,
            )
        });
        assert_eq!(code, 0);
        assert_eq!(text, "CREDITED\n");
    }

    #[test]
    fn apply_with_subject_prints_record() {
        let id = InvoiceId::new();
        let (code, text) = capture(|out| {
            apply(
                invoice_lifecycle(),
                Some(&id),
                &InvoiceState::Issued,
                InvoiceTransition::Pay,
                OutputFormat::Json,
                out,
            )
        });
        assert_eq!(code, 0);
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(doc["subject"], id.as_uuid().to_string());
        assert_eq!(doc["from"], "ISSUED");
        assert_eq!(doc["to"], "PAID");
        assert!(doc["at"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn apply_rejection_reports_error() {
        let (code, text) = capture(|out| {
            apply::<_, _, InvoiceId>(
                invoice_lifecycle(),
                None,
                &InvoiceState::Cancelled,
                InvoiceTransition::Pay,
                OutputFormat::Json,
                out,
            )
        });
        assert_eq!(code, EXIT_REJECTED);
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(doc["error"], "invalid_transition");
        assert_eq!(doc["from"], "CANCELLED");
        assert_eq!(doc["transition"], "PAY");
    }

    #[test]
    fn transitions_text_lists_terminal() {
        let (_, text) = capture(|out| {
            transitions(invoice_lifecycle(), &InvoiceState::Credited, OutputFormat::Text, out)
        });
        assert_eq!(text, "CREDITED: no transitions (terminal)\n");

        let (_, text) = capture(|out| {
            transitions(invoice_lifecycle(), &InvoiceState::Draft, OutputFormat::Text, out)
        });
        assert_eq!(text, "SEND\nVOID\n");
    }

    #[test]
    fn table_json_lists_all_rules() {
        let (_, text) = capture(|out| table(invoice_lifecycle(), OutputFormat::Json, out));
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(doc["rules"].as_array().unwrap().len(), 8);
        assert_eq!(doc["rules"][7]["transition"], "REFUND");
    }

    #[test]
    fn table_text_renders_rules() {
        let (_, text) = capture(|out| table(invoice_lifecycle(), OutputFormat::Text, out));
        assert_eq!(text.lines().next(), Some("DRAFT --SEND--> ISSUED"));
        assert_eq!(text.lines().count(), 8);
    }
}
