#![deny(unsafe_code)]

//! On-disk rule file schema.
//!
//! ```toml
//! [[type_rule]]
//! type = 3
//! count = 1
//!
//! [[type_rule.rule]]
//! field = ["Manufacturer"]
//!
//! [[type_rule.rule]]
//! field = ["Lock"]
//! validations = { in_list = ["Present", "Not Present"] }
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSetSpec {
    #[serde(default)]
    pub type_rule: Vec<TypeRuleSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeRuleSpec {
    #[serde(rename = "type")]
    pub table_type: u8,
    /// Minimum number of tables of this type.
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub rule: Vec<RuleSpec>,
    #[serde(default)]
    pub conditional_rule: Vec<ConditionalRuleSpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSpec {
    /// Field names sharing the validations below.
    pub field: Vec<String>,
    #[serde(default)]
    pub validations: Option<ValidationsSpec>,
    /// Rules applied to the field's `name: value` items.
    #[serde(default)]
    pub item_rule: Vec<RuleSpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConditionalRuleSpec {
    #[serde(default)]
    pub condition: Vec<RuleSpec>,
    #[serde(default)]
    pub rule: Vec<RuleSpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationsSpec {
    #[serde(default)]
    pub regexp: Option<String>,
    #[serde(default)]
    pub in_list: Option<Vec<String>>,
    /// Candidates are regex fragments, not literal substrings.
    #[serde(default)]
    pub not_contain: Option<Vec<String>>,
    /// Group size of the item list; the field value is the group count.
    #[serde(default)]
    pub item_count_unique: Option<usize>,
    /// Required table type of the handle in the field value.
    #[serde(default)]
    pub handle_type: Option<u8>,
    #[serde(default)]
    pub handles_presence: bool,
}
