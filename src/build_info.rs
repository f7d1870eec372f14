//! Compile-time build information shown by `--version`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version banner, e.g. `laneshift 0.1.0 (2026-10-18, a1b2c3d)`.
pub fn version_line() -> String {
    format!(
        "laneshift {} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}
