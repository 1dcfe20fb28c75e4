//! Weave pass tracing boundary.
//!
//! Tracing is optional, injected by the caller, and must not affect the output.

use crate::diagnostic::{Diagnostic, DiagnosticCode, Severity};
use derive_more::Display;
use std::cell::RefCell;

///
/// WeaveTraceSink
///

pub trait WeaveTraceSink {
    fn on_event(&self, event: &WeaveTraceEvent);
}

///
/// WeavePhase
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum WeavePhase {
    Discovered,
    Sorted,
    Processing,
    Done,
    Failed,
}

///
/// WeaveTraceEvent
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum WeaveTraceEvent {
    Phase {
        phase: WeavePhase,
        types: usize,
    },
    TypeStart {
        ident: String,
    },
    TypeFinish {
        ident: String,
        members: Vec<&'static str>,
    },
    Diagnostic {
        code: DiagnosticCode,
        severity: Severity,
        message: String,
    },
}

impl WeaveTraceEvent {
    #[must_use]
    pub fn diagnostic(diag: &Diagnostic) -> Self {
        Self::Diagnostic {
            code: diag.code,
            severity: diag.severity,
            message: diag.message.clone(),
        }
    }
}

///
/// RecordingSink
///
/// Keeps every event in order; handy for tests and tooling.
///

#[derive(Debug, Default)]
pub struct RecordingSink {
    events: RefCell<Vec<WeaveTraceEvent>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<WeaveTraceEvent> {
        self.events.borrow().clone()
    }

    /// Phases in the order they were entered.
    #[must_use]
    pub fn phases(&self) -> Vec<WeavePhase> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                WeaveTraceEvent::Phase { phase, .. } => Some(*phase),
                _ => None,
            })
            .collect()
    }
}

impl WeaveTraceSink for RecordingSink {
    fn on_event(&self, event: &WeaveTraceEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
