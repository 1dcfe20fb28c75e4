use derive_more::Display;
use proc_macro2::{Span, TokenStream};
use quote::ToTokens;
use std::fmt;

///
/// Severity
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Severity {
    #[display("error")]
    Error,

    #[display("warning")]
    Warning,
}

///
/// DiagnosticCode
///
/// Stable identifiers for every failure the weaver can report.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[remain::sorted]
pub enum DiagnosticCode {
    AdditionalEqualitySignature,
    AdditionalHashSignature,
    InheritanceCycle,
    InvalidBase,
    InvalidConfiguration,
    LifetimeParameters,
    MalformedOperatorStub,
    MissingOperatorMarker,
    MissingOperatorStub,
    NotAStruct,
    SuppressedOperatorStub,
}

impl DiagnosticCode {
    #[must_use]
    #[remain::check]
    pub const fn code(self) -> &'static str {
        #[remain::sorted]
        match self {
            Self::AdditionalEqualitySignature => "EQU5",
            Self::AdditionalHashSignature => "EQU6",
            Self::InheritanceCycle => "EQU9",
            Self::InvalidBase => "EQU8",
            Self::InvalidConfiguration => "EQU1",
            Self::LifetimeParameters => "EQU10",
            Self::MalformedOperatorStub => "EQU3",
            Self::MissingOperatorMarker => "EQU4",
            Self::MissingOperatorStub => "EQU2",
            Self::NotAStruct => "EQU7",
            Self::SuppressedOperatorStub => "EQU11",
        }
    }

    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::SuppressedOperatorStub => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

///
/// Diagnostic
///
/// One `(code, severity, message)` triple, anchored at the offending tokens.
///

#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, span: Span, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: code.severity(),
            message: message.into(),
            span,
        }
    }

    /// Anchor the diagnostic at the first token of `tokens`.
    pub fn spanned<T: ToTokens>(code: DiagnosticCode, tokens: T, message: impl Into<String>) -> Self {
        let span = tokens
            .into_token_stream()
            .into_iter()
            .next()
            .map_or_else(Span::call_site, |tt| tt.span());

        Self::new(code, span, message)
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Render as a `compile_error!` invocation at the diagnostic's span.
    #[must_use]
    pub fn to_compile_error(&self) -> TokenStream {
        syn::Error::new(self.span, self.to_string()).to_compile_error()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

impl From<darling::Error> for Diagnostic {
    fn from(err: darling::Error) -> Self {
        Self::new(
            DiagnosticCode::InvalidConfiguration,
            err.span(),
            format!("invalid #[structural_equality] attribute: {err}"),
        )
    }
}

///
/// TESTS
///
