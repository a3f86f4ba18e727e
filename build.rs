//! Stamps the binary with the source revision and build date.

use std::env;
use std::process::Command;

/// Short hash of the checked-out revision, if this is a git checkout.
fn git_revision() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    let hash = hash.trim();
    (!hash.is_empty()).then(|| hash.to_string())
}

fn main() {
    let commit = env::var("SPIRITLING_BUILD_COMMIT")
        .ok()
        .or_else(git_revision)
        .unwrap_or_else(|| "unknown".to_string());
    let date = env::var("SPIRITLING_BUILD_DATE")
        .unwrap_or_else(|_| chrono::Utc::now().format("%Y-%m-%d").to_string());

    println!("cargo:rustc-env=SPIRITLING_BUILD_COMMIT={commit}");
    println!("cargo:rustc-env=SPIRITLING_BUILD_DATE={date}");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=SPIRITLING_BUILD_COMMIT");
    println!("cargo:rerun-if-env-changed=SPIRITLING_BUILD_DATE");
}
