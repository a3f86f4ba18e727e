//! Version stamp baked in by `build.rs`.

pub const BUILD_COMMIT: &str = env!("SPIRITLING_BUILD_COMMIT");
pub const BUILD_DATE: &str = env!("SPIRITLING_BUILD_DATE");

/// `<package> <version> (<date>, <commit>)`, as printed by `--version`.
pub fn version_line() -> String {
    format!(
        "{} {} ({}, {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}
