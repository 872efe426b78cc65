//! Version information.

use calcof_core::CALCULATOR_NAMES;

/// Get the version string.
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Version line with the number of bundled calculators.
#[must_use]
pub fn full_version() -> String {
    format!("calcof {} ({} calculators)", version(), CALCULATOR_NAMES.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_not_empty() {
        assert!(!version().is_empty());
    }

    #[test]
    fn full_version_counts_calculators() {
        assert!(full_version().starts_with("calcof "));
        assert!(full_version().contains("9 calculators"));
    }
}
