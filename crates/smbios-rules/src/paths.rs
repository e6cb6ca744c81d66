//! Rule file path resolution.

use std::path::{Path, PathBuf};

/// Environment variable for overriding the rule file.
pub const RULES_ENV_VAR: &str = "SMBIOS_RULES_FILE";

/// Get the default rule file.
///
/// Resolution order:
/// 1. `SMBIOS_RULES_FILE` environment variable
/// 2. `rules/default.toml` relative to workspace root
pub fn default_rules_path() -> PathBuf {
    if let Ok(path) = std::env::var(RULES_ENV_VAR) {
        return PathBuf::from(path);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../rules/default.toml")
}

/// An explicit path wins over the environment and the bundled default.
pub fn resolve_rules_path(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(default_rules_path, Path::to_path_buf)
}
