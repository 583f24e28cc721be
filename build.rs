//! Retrieves information about the version of the engine from Git and the build
//! environment. This information is then written to a file in the output
//! directory and can be accessed at runtime by the engine.

use std::path::Path;
use std::{env, fs};

fn generate_file(filename: &str, contents: &str) {
    let out_dir = env::var_os("OUT_DIR").expect("cargo always sets OUT_DIR");
    let dest_path = Path::new(&out_dir).join(filename);
    fs::write(dest_path, contents).expect("OUT_DIR is writable");
}

// Move application checks its preconditions with debug assertions only.
fn generate_build_info() {
    let debug_assertions = env::var_os("CARGO_CFG_DEBUG_ASSERTIONS").is_some();
    let features = format!(
        "{}debug_assertions",
        if debug_assertions { "+" } else { "-" }
    );
    generate_file("features", &features);
}

fn main() -> shadow_rs::SdResult<()> {
    generate_build_info();
    shadow_rs::new()
}
