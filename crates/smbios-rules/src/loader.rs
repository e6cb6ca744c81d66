use std::path::Path;

use tracing::{debug, info};

use crate::error::RulesError;
use crate::model::RuleSet;
use crate::paths::default_rules_path;
use crate::spec::RuleSetSpec;

/// Parse and compile rules from TOML text.
pub fn parse_rules(text: &str) -> Result<RuleSet, RulesError> {
    let spec: RuleSetSpec = toml::from_str(text)?;
    RuleSet::from_spec(&spec)
}

/// Load and compile a rule file.
pub fn load_rules(path: &Path) -> Result<RuleSet, RulesError> {
    let text = std::fs::read_to_string(path).map_err(|source| RulesError::io(path, source))?;
    let spec: RuleSetSpec = toml::from_str(&text).map_err(|source| RulesError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), type_rules = spec.type_rule.len(), "read rule file");
    let rules = RuleSet::from_spec(&spec)?;
    info!(path = %path.display(), type_rules = rules.len(), "loaded rules");
    Ok(rules)
}

/// Load the rule file named by [`default_rules_path`].
pub fn load_default_rules() -> Result<RuleSet, RulesError> {
    load_rules(&default_rules_path())
}
