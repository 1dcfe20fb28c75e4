use std::error::Error;

// weaves the file-based fixture used by tests/woven_file.rs
fn main() -> Result<(), Box<dyn Error>> {
    arkane_build::build!("tests/fixtures/ledger.rs" => "ledger.rs");

    Ok(())
}
