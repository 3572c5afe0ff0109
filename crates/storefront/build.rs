//! Build script for the storefront crate.
//!
//! Fingerprints the stylesheet so the page can reference it by content
//! hash: `static/css/main.css` is copied to
//! `static/css/derived/main.<hash>.css` and `CSS_HASH` is exported for the
//! `css_hash` template filter.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

/// Number of hex digits of the SHA-256 kept in the file name.
const HASH_LEN: usize = 8;

fn main() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let css_dir = Path::new(&manifest_dir).join("static/css");
    let css_path = css_dir.join("main.css");

    println!("cargo:rerun-if-changed={}", css_path.display());

    let content = match fs::read(&css_path) {
        Ok(content) => content,
        Err(e) => {
            println!("cargo:warning=Could not read main.css: {e}");
            println!("cargo:rustc-env=CSS_HASH=");
            return;
        }
    };

    let digest = format!("{:x}", Sha256::digest(&content));
    let hash = &digest[..HASH_LEN];
    println!("cargo:rustc-env=CSS_HASH={hash}");

    let derived_dir = css_dir.join("derived");
    fs::create_dir_all(&derived_dir).expect("Failed to create derived CSS directory");

    // Drop fingerprints of earlier versions so the directory holds one file.
    if let Ok(entries) = fs::read_dir(&derived_dir) {
        for entry in entries.flatten() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with("main.") && name.ends_with(".css") && name != format!("main.{hash}.css") {
                let _ = fs::remove_file(entry.path());
            }
        }
    }

    fs::copy(&css_path, derived_dir.join(format!("main.{hash}.css")))
        .expect("Failed to copy CSS to derived directory");
}
