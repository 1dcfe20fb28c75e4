//! Build-script support: weave a whole source file into `OUT_DIR`.
//!
//! The `#[weave]` attribute covers inline modules; this crate covers files
//! that are compiled through `include!` instead.

mod macros;
mod sink;

pub use sink::CargoTraceSink;

use arkane_weaver::{WeaveError, WeaveOptions, WeaveOutput, Weaver};
use quote::ToTokens;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

///
/// BuildError
///

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error("OUT_DIR is not set; arkane::build! must run inside a build script")]
    OutDirMissing,

    #[error("cannot access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse '{}': {source}", path.display())]
    Parse { path: PathBuf, source: syn::Error },

    #[error("cannot weave '{}':\n{source}", path.display())]
    Weave { path: PathBuf, source: WeaveError },
}

/// Weave a source file and return the generated Rust source.
///
/// Warnings are forwarded to Cargo.
pub fn generate(path: impl AsRef<Path>) -> Result<String, BuildError> {
    let sink = CargoTraceSink;
    let weaver = Weaver::new(WeaveOptions::default()).with_sink(&sink);

    generate_with(path, &weaver)
}

/// Weave a source file with a caller-supplied weaver.
pub fn generate_with(path: impl AsRef<Path>, weaver: &Weaver<'_>) -> Result<String, BuildError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let output = weave_source(&source, weaver).map_err(|err| err.at(path))?;

    Ok(output.to_token_stream().to_string())
}

/// Weave source text.
///
/// Inner attributes of the file are dropped, since the result is meant for
/// `include!`, which only accepts items.
pub fn weave_source(source: &str, weaver: &Weaver<'_>) -> Result<WeaveOutput, SourceError> {
    let file = syn::parse_file(source).map_err(SourceError::Parse)?;

    weaver.weave(file.items).map_err(SourceError::Weave)
}

/// Weave `src` and write the result to `$OUT_DIR/out_name`.
pub fn weave_to_out_dir(src: impl AsRef<Path>, out_name: &str) -> Result<PathBuf, BuildError> {
    let out_dir = env::var_os("OUT_DIR").ok_or(BuildError::OutDirMissing)?;
    let target = PathBuf::from(out_dir).join(out_name);
    let output = generate(src)?;

    fs::write(&target, output).map_err(|source| BuildError::Io {
        path: target.clone(),
        source,
    })?;

    Ok(target)
}

///
/// SourceError
///
/// Failure of `weave_source`, before a file path is attached.
///

#[derive(Debug, ThisError)]
pub enum SourceError {
    #[error(transparent)]
    Parse(syn::Error),

    #[error(transparent)]
    Weave(WeaveError),
}

impl SourceError {
    fn at(self, path: &Path) -> BuildError {
        let path = path.to_path_buf();

        match self {
            Self::Parse(source) => BuildError::Parse { path, source },
            Self::Weave(source) => BuildError::Weave { path, source },
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use arkane_weaver::CratePaths;
    use quote::quote;

    fn weaver() -> Weaver<'static> {
        Weaver::new(WeaveOptions {
            paths: CratePaths::with_core(quote!(::arkane_core)),
            strip_markers: true,
        })
    }

    #[test]
    fn weaves_source_text() {
        let output = weave_source(
            r"
            //! model types
            #[structural_equality]
            pub struct Point { pub x: i32, pub y: i32 }

            impl PartialEq for Point {
                fn eq(&self, other: &Self) -> bool { arkane::operator() }
            }
            ",
            &weaver(),
        )
        .unwrap();

        let text = output.to_token_stream().to_string();
        assert_eq!(output.woven.len(), 1);
        assert!(!text.contains("model types"), "{text}");
        assert!(text.contains("HashCode for Point"), "{text}");
    }

    #[test]
    fn parse_errors_name_the_file() {
        let err = weave_source("struct {", &weaver())
            .unwrap_err()
            .at(Path::new("src/model.rs"));

        assert!(matches!(err, BuildError::Parse { .. }));
        assert!(err.to_string().starts_with("cannot parse 'src/model.rs'"));
    }

    #[test]
    fn weave_errors_carry_diagnostics() {
        let err = weave_source(
            "#[structural_equality] pub struct Point { pub x: i32 }",
            &weaver(),
        )
        .unwrap_err()
        .at(Path::new("src/model.rs"));

        let BuildError::Weave { source, .. } = &err else {
            panic!("expected a weave error, got {err}");
        };
        assert_eq!(source.diagnostics()[0].code.code(), "EQU2");
        assert!(err.to_string().contains("error[EQU2]"));
    }

    #[test]
    fn missing_files_are_io_errors() {
        let err = generate_with("does/not/exist.rs", &weaver()).unwrap_err();

        assert!(matches!(err, BuildError::Io { .. }));
    }
}
