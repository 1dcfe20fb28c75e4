use crate::diagnostic::Diagnostic;
use proc_macro2::TokenStream;
use thiserror::Error as ThisError;

///
/// WeaveError
///

#[derive(Debug, ThisError)]
pub enum WeaveError {
    /// Discovery or synthesis rejected the item set.
    #[error("{}", render(.0))]
    Diagnostics(Vec<Diagnostic>),
}

impl WeaveError {
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Diagnostics(diags) => diags,
        }
    }

    /// One `compile_error!` per diagnostic, each at its own span.
    #[must_use]
    pub fn to_compile_error(&self) -> TokenStream {
        self.diagnostics()
            .iter()
            .map(Diagnostic::to_compile_error)
            .collect()
    }
}

impl From<Diagnostic> for WeaveError {
    fn from(diag: Diagnostic) -> Self {
        Self::Diagnostics(vec![diag])
    }
}

fn render(diags: &[Diagnostic]) -> String {
    diags
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
