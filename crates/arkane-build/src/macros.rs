//! Build-script helper that weaves source files into `OUT_DIR`.

/// Weave each `src => out` pair, writing the result to `$OUT_DIR/out`.
///
/// Must run inside `fn main() -> Result<(), E>` where `E: From<BuildError>`.
/// Pair with `arkane::include_woven!("out")` on the consuming side.
#[macro_export]
macro_rules! build {
    ($($src:expr => $out:expr),+ $(,)?) => {
        println!("cargo:rerun-if-changed=build.rs");
        $(
            println!("cargo:rerun-if-changed={}", $src);
            $crate::weave_to_out_dir($src, $out)?;
        )+
    };
}
