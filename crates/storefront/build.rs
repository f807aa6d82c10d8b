//! Build script for the storefront crate.
//!
//! Fingerprints the stylesheet so templates can reference it with a
//! cache-busting query string.

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

fn main() {
    fingerprint_css();
}

/// Hash `static/css/main.css` and expose the first 8 hex chars as `CSS_HASH`.
fn fingerprint_css() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let css_path = Path::new(&manifest_dir).join("static/css/main.css");

    println!("cargo:rerun-if-changed={}", css_path.display());

    let Ok(content) = fs::read(&css_path) else {
        println!("cargo:warning=Could not read main.css, CSS_HASH left empty");
        println!("cargo:rustc-env=CSS_HASH=");
        return;
    };

    let digest = Sha256::digest(&content);
    let mut short_hash = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        let _ = write!(short_hash, "{byte:02x}");
    }

    println!("cargo:rustc-env=CSS_HASH={short_hash}");
}
