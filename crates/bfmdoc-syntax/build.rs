//! Generates one golden test per documentation fixture.
//!
//! Each test embeds its `.bfm` file with `include_str!` and hands it to
//! `fixture_test` in `tests/fixtures.rs`, which compares the tree against
//! the snapshot committed under `tests/snapshots/`.

use std::error::Error;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::{env, fs};

const FIXTURE_DIR: &str = "tests/fixtures";
const FIXTURE_EXTENSION: &str = "bfm";

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo::rerun-if-changed={FIXTURE_DIR}");

    let mut fixtures: Vec<PathBuf> = fs::read_dir(FIXTURE_DIR)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == FIXTURE_EXTENSION))
        .collect();
    fixtures.sort();

    let mut code = String::from("mod golden {\n    use super::fixture_test;\n");
    for path in &fixtures {
        let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        // fixture names double as test names
        let test_name = name.replace(['-', '.', ' '], "_");
        write!(
            code,
            r#"
    #[test]
    fn {test_name}() {{
        let source = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/{FIXTURE_DIR}/{name}.{FIXTURE_EXTENSION}"));
        fixture_test({name:?}, source);
    }}
"#
        )?;
    }
    code.push_str("}\n");

    let dest = Path::new(&env::var("OUT_DIR")?).join("fixture_tests.rs");
    fs::write(dest, code)?;
    Ok(())
}
