//! Verdict presenter — deterministic mapping from an outcome to its
//! user-facing classification. Pure; no registry access.

use crate::outcome::{OutcomeKind, VerificationOutcome};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Severity {
    Success,
    Danger,
    Warning,
}

/// What the scanning party sees.
#[derive(Clone, Debug, Serialize)]
pub struct Presentation {
    pub label: &'static str,
    pub severity: Severity,
    pub detail: String,
    /// Ledger reference, present only for an authentic verdict.
    pub reference: Option<String>,
}

/// Total over the outcome domain.
///
/// `Fake` and `AlreadyConsumed` deliberately share one label: a scanner
/// must not learn whether a failing token was never issued or merely
/// used, only that the item cannot be trusted. The diagnostic detail may
/// still differ.
pub fn present(outcome: &VerificationOutcome) -> Presentation {
    match outcome.kind() {
        OutcomeKind::Authentic => Presentation {
            label: "AUTHENTIC",
            severity: Severity::Success,
            detail: outcome.diagnostic().to_string(),
            reference: outcome.receipt().map(|r| r.tx_ref.to_string()),
        },
        OutcomeKind::Fake | OutcomeKind::AlreadyConsumed => Presentation {
            label: "FAKE / USED",
            severity: Severity::Danger,
            detail: outcome.diagnostic().to_string(),
            reference: None,
        },
        OutcomeKind::Indeterminate => Presentation {
            label: "UNVERIFIED",
            severity: Severity::Warning,
            detail: outcome.diagnostic().to_string(),
            reference: None,
        },
    }
}
