use arkane_weaver::{Severity, WeaveTraceEvent, WeaveTraceSink};

///
/// CargoTraceSink
///
/// Forwards weave warnings to Cargo so they show up in build output.
/// Errors are returned to the build script instead.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct CargoTraceSink;

impl CargoTraceSink {
    /// The `cargo:warning=` line for an event, if it should be shown.
    #[must_use]
    pub fn render(event: &WeaveTraceEvent) -> Option<String> {
        match event {
            WeaveTraceEvent::Diagnostic {
                code,
                severity: Severity::Warning,
                message,
            } => {
                // cargo reads one directive per line
                let message = message.split_whitespace().collect::<Vec<_>>().join(" ");
                Some(format!("cargo:warning={code}: {message}"))
            }
            _ => None,
        }
    }
}

impl WeaveTraceSink for CargoTraceSink {
    fn on_event(&self, event: &WeaveTraceEvent) {
        if let Some(line) = Self::render(event) {
            println!("{line}");
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use arkane_weaver::{DiagnosticCode, WeavePhase};

    #[test]
    fn warnings_become_single_cargo_lines() {
        let event = WeaveTraceEvent::Diagnostic {
            code: DiagnosticCode::SuppressedOperatorStub,
            severity: Severity::Warning,
            message: "stub left\nuntouched".to_string(),
        };

        assert_eq!(
            CargoTraceSink::render(&event).as_deref(),
            Some("cargo:warning=EQU11: stub left untouched")
        );
    }

    #[test]
    fn other_events_are_silent() {
        let phase = WeaveTraceEvent::Phase {
            phase: WeavePhase::Done,
            types: 3,
        };
        let error = WeaveTraceEvent::Diagnostic {
            code: DiagnosticCode::InheritanceCycle,
            severity: Severity::Error,
            message: "cycle".to_string(),
        };

        assert!(CargoTraceSink::render(&phase).is_none());
        assert!(CargoTraceSink::render(&error).is_none());
    }
}
