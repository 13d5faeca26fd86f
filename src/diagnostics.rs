//! Non-fatal notices about degraded or ignored input.
//!
//! Resolvers never fail the pipeline for incomplete metadata. Instead they
//! emit a [`Diagnostic`] through a [`Diagnostics`] sink, which logs it and
//! keeps a copy so callers can report on what was ignored.

use log::{info, warn};
use std::fmt;
use std::sync::Mutex;

/// A single non-fatal notice produced while documenting a controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// No documentation metadata was declared; defaults are kept.
    MissingMetadata { subject: String, detail: String },
    /// A declared model disagrees with the statically inferred type.
    ModelTypeMismatch {
        subject: String,
        declared: String,
        inferred: String,
    },
    /// More than one path template at one level; the first one is used.
    AmbiguousRouteTemplate {
        owner: String,
        used: String,
        ignored: Vec<String>,
    },
    /// The allowable values of a parameter could not be parsed.
    MalformedConstraint {
        parameter: String,
        raw: String,
        reason: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingMetadata { subject, detail } => {
                write!(f, "{}: {}", subject, detail)
            }
            Diagnostic::ModelTypeMismatch {
                subject,
                declared,
                inferred,
            } => write!(
                f,
                "{}: model override {} does not match the resolved type {}",
                subject, declared, inferred
            ),
            Diagnostic::AmbiguousRouteTemplate { owner, used, ignored } => write!(
                f,
                "{} declares multiple paths; only {} will be documented (ignored: {})",
                owner,
                used,
                ignored.join(", ")
            ),
            Diagnostic::MalformedConstraint {
                parameter,
                raw,
                reason,
            } => write!(
                f,
                "{}: allowable values '{}' skipped: {}",
                parameter, raw, reason
            ),
        }
    }
}

/// Collects diagnostics for one controller.
///
/// Safe to share between workers; entries keep emission order.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs the diagnostic and records it.
    pub fn emit(&self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::AmbiguousRouteTemplate { .. } => info!("{}", diagnostic),
            _ => warn!("{}", diagnostic),
        }
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(diagnostic);
    }

    /// Returns a copy of everything emitted so far.
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
