#![deny(unsafe_code)]

pub mod error;
pub mod loader;
pub mod model;
pub mod paths;
pub mod spec;

pub use crate::error::RulesError;
pub use crate::loader::{load_default_rules, load_rules, parse_rules};
pub use crate::model::{
    ConditionalRule, FieldRule, NotContain, Pattern, RuleSet, TypeRule, Validations,
};
pub use crate::paths::{RULES_ENV_VAR, default_rules_path, resolve_rules_path};
pub use crate::spec::{ConditionalRuleSpec, RuleSetSpec, RuleSpec, TypeRuleSpec, ValidationsSpec};
