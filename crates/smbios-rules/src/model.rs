#![deny(unsafe_code)]

//! Compiled rule tree.
//!
//! Built once from a [`RuleSetSpec`] and read-only afterwards. Patterns are
//! compiled here so a bad pattern is a load error rather than a failure in the
//! middle of a validation run.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use regex::Regex;
use tracing::warn;

use crate::error::RulesError;
use crate::spec::{ConditionalRuleSpec, RuleSetSpec, RuleSpec, TypeRuleSpec, ValidationsSpec};

/// A compiled pattern together with its source text for diagnostics.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub source: String,
    pub regex: Regex,
}

impl Pattern {
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

/// Forbidden candidates, each compiled as `.*(<candidate>).*`.
#[derive(Debug, Clone)]
pub struct NotContain {
    pub candidates: Vec<String>,
    pub patterns: Vec<Regex>,
}

/// Independent optional checks for one field. `None` means not configured.
#[derive(Debug, Clone, Default)]
pub struct Validations {
    pub regexp: Option<Pattern>,
    pub in_list: Option<Vec<String>>,
    pub not_contain: Option<NotContain>,
    pub item_count_unique: Option<usize>,
    pub handle_type: Option<u8>,
    pub handles_presence: bool,
}

impl Validations {
    fn compile(
        spec: Option<&ValidationsSpec>,
        table_type: u8,
        field: &str,
    ) -> Result<Self, RulesError> {
        let Some(spec) = spec else {
            return Ok(Self::default());
        };
        let compile = |pattern: &str, source: &str| {
            Regex::new(pattern).map_err(|error| RulesError::InvalidPattern {
                table_type,
                field: field.to_string(),
                pattern: source.to_string(),
                source: error,
            })
        };

        let regexp = match &spec.regexp {
            Some(source) => Some(Pattern {
                source: source.clone(),
                regex: compile(source, source)?,
            }),
            None => None,
        };
        let not_contain = match &spec.not_contain {
            Some(candidates) => Some(NotContain {
                candidates: candidates.clone(),
                patterns: candidates
                    .iter()
                    .map(|candidate| compile(&format!(".*({candidate}).*"), candidate))
                    .collect::<Result<_, _>>()?,
            }),
            None => None,
        };
        if spec.item_count_unique == Some(0) {
            return Err(RulesError::InvalidGroupSize {
                table_type,
                field: field.to_string(),
            });
        }

        Ok(Self {
            regexp,
            in_list: spec.in_list.clone(),
            not_contain,
            item_count_unique: spec.item_count_unique,
            handle_type: spec.handle_type,
            handles_presence: spec.handles_presence,
        })
    }

    /// True when no check is configured (presence only).
    pub fn is_presence_only(&self) -> bool {
        self.regexp.is_none()
            && self.in_list.is_none()
            && self.not_contain.is_none()
            && self.item_count_unique.is_none()
            && self.handle_type.is_none()
            && !self.handles_presence
    }
}

/// One field name bound to a validation bundle.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: String,
    /// Shared by every field listed in the same rule entry.
    pub validations: Arc<Validations>,
    /// Rules for the field's `name: value` items.
    pub item_rules: Vec<FieldRule>,
}

/// Consequent rules gated by condition rules.
#[derive(Debug, Clone, Default)]
pub struct ConditionalRule {
    pub condition: Vec<FieldRule>,
    pub rules: Vec<FieldRule>,
}

/// Every rule declared for one table type.
#[derive(Debug, Clone)]
pub struct TypeRule {
    pub table_type: u8,
    pub count: u32,
    pub rules: Vec<FieldRule>,
    pub conditional_rules: Vec<ConditionalRule>,
}

impl TypeRule {
    pub fn from_spec(spec: &TypeRuleSpec) -> Result<Self, RulesError> {
        let table_type = spec.table_type;
        let conditional_rules: Vec<ConditionalRule> = spec
            .conditional_rule
            .iter()
            .map(|cond| expand_conditional(cond, table_type))
            .collect::<Result<_, _>>()?;
        Ok(Self {
            table_type,
            count: spec.count,
            rules: expand_rules(&spec.rule, table_type)?,
            conditional_rules,
        })
    }

    /// No field rules and no conditional rules; records of this type are skipped.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.conditional_rules.is_empty()
    }
}

fn expand_conditional(
    spec: &ConditionalRuleSpec,
    table_type: u8,
) -> Result<ConditionalRule, RulesError> {
    Ok(ConditionalRule {
        condition: expand_rules(&spec.condition, table_type)?,
        rules: expand_rules(&spec.rule, table_type)?,
    })
}

/// Expand each entry into one rule per listed field name.
fn expand_rules(specs: &[RuleSpec], table_type: u8) -> Result<Vec<FieldRule>, RulesError> {
    let mut rules = Vec::with_capacity(specs.iter().map(|spec| spec.field.len()).sum());
    for spec in specs {
        let Some(first) = spec.field.first() else {
            return Err(RulesError::EmptyFieldList { table_type });
        };
        let validations = Arc::new(Validations::compile(
            spec.validations.as_ref(),
            table_type,
            first,
        )?);
        let item_rules = expand_rules(&spec.item_rule, table_type)?;
        for field in &spec.field {
            rules.push(FieldRule {
                field: field.clone(),
                validations: Arc::clone(&validations),
                item_rules: item_rules.clone(),
            });
        }
    }
    Ok(rules)
}

/// The compiled rule tree for a whole rule file.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    type_rules: Vec<TypeRule>,
}

impl RuleSet {
    pub fn from_spec(spec: &RuleSetSpec) -> Result<Self, RulesError> {
        let type_rules: Vec<TypeRule> = spec
            .type_rule
            .iter()
            .map(TypeRule::from_spec)
            .collect::<Result<_, _>>()?;
        let mut seen = BTreeSet::new();
        for rule in &type_rules {
            if !seen.insert(rule.table_type) {
                warn!(
                    table_type = rule.table_type,
                    "type declared more than once; first declaration validates records, last count wins"
                );
            }
        }
        Ok(Self { type_rules })
    }

    /// Rules for a table type, or `None` when the type has no non-empty rule.
    pub fn type_rule(&self, table_type: u8) -> Option<&TypeRule> {
        self.type_rules
            .iter()
            .find(|rule| rule.table_type == table_type)
            .filter(|rule| !rule.is_empty())
    }

    /// All declarations in file order.
    pub fn type_rules(&self) -> &[TypeRule] {
        &self.type_rules
    }

    /// Minimum instance count per table type; a later declaration overrides an earlier one.
    pub fn required_counts(&self) -> BTreeMap<u8, u32> {
        self.type_rules
            .iter()
            .map(|rule| (rule.table_type, rule.count))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.type_rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.type_rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(fields: &[&str], validations: Option<ValidationsSpec>) -> RuleSpec {
        RuleSpec {
            field: fields.iter().map(|f| f.to_string()).collect(),
            validations,
            item_rule: Vec::new(),
        }
    }

    #[test]
    fn multi_field_entry_expands_with_shared_validations() {
        let spec = TypeRuleSpec {
            table_type: 4,
            count: 0,
            rule: vec![rule(
                &["Core Count", "Thread Count"],
                Some(ValidationsSpec {
                    regexp: Some(r"^\d+$".to_string()),
                    ..Default::default()
                }),
            )],
            conditional_rule: Vec::new(),
        };
        let type_rule = TypeRule::from_spec(&spec).unwrap();
        assert_eq!(type_rule.rules.len(), 2);
        assert_eq!(type_rule.rules[0].field, "Core Count");
        assert_eq!(type_rule.rules[1].field, "Thread Count");
        assert!(Arc::ptr_eq(
            &type_rule.rules[0].validations,
            &type_rule.rules[1].validations
        ));
    }

    #[test]
    fn not_contain_candidates_compile_as_fragments() {
        let validations = Validations::compile(
            Some(&ValidationsSpec {
                not_contain: Some(vec!["To Be Filled".to_string(), "O.E.M".to_string()]),
                ..Default::default()
            }),
            1,
            "Serial Number",
        )
        .unwrap();
        let not_contain = validations.not_contain.unwrap();
        assert_eq!(not_contain.candidates, ["To Be Filled", "O.E.M"]);
        assert!(not_contain.patterns[1].is_match("OxEyM"));
    }

    #[test]
    fn missing_validations_is_presence_only() {
        let validations = Validations::compile(None, 0, "Version").unwrap();
        assert!(validations.is_presence_only());
    }

    #[test]
    fn zero_group_size_is_rejected() {
        let err = Validations::compile(
            Some(&ValidationsSpec {
                item_count_unique: Some(0),
                ..Default::default()
            }),
            14,
            "Items",
        )
        .unwrap_err();
        assert!(matches!(err, RulesError::InvalidGroupSize { table_type: 14, .. }));
    }
}
