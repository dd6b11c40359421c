//! Validation System - Rule/Policy Separation
//!
//! Rules produce structured violations against a built definition.
//! Policy: any Error blocks the item, Warnings are recorded and passed through.

use serde::{Deserialize, Serialize};

use crate::classify::MAX_TAGS;
use crate::definition::EffectDefinition;
use crate::naming::is_script_identifier;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationViolation {
    pub rule: String,
    pub severity: ViolationSeverity,
    pub message: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub violations: Vec<ValidationViolation>,
    pub effect_id: String,
}

impl ValidationResult {
    pub fn errors(&self) -> impl Iterator<Item = &ValidationViolation> {
        self.violations.iter().filter(|v| v.severity == ViolationSeverity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationViolation> {
        self.violations.iter().filter(|v| v.severity == ViolationSeverity::Warning)
    }

    /// `rule: message` for every error, `; `-joined.
    pub fn error_summary(&self) -> String {
        self.errors()
            .map(|v| format!("{}: {}", v.rule, v.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Validation rule trait - produces violations
pub trait ValidationRule {
    fn name(&self) -> &'static str;
    fn validate(&self, def: &EffectDefinition) -> Vec<ValidationViolation>;
}

fn violation(rule: &str, severity: ViolationSeverity, message: &str) -> ValidationViolation {
    ValidationViolation {
        rule: rule.to_string(),
        severity,
        message: message.to_string(),
        expected: None,
        actual: None,
    }
}

// --- Concrete Rules ---

pub struct RequiredFieldsRule;

impl ValidationRule for RequiredFieldsRule {
    fn name(&self) -> &'static str { "required_fields" }

    fn validate(&self, def: &EffectDefinition) -> Vec<ValidationViolation> {
        let mut violations = vec![];

        if def.id.is_empty() {
            violations.push(violation(self.name(), ViolationSeverity::Error, "Empty id"));
        }
        if def.name.trim().is_empty() {
            violations.push(violation(self.name(), ViolationSeverity::Error, "Empty display name"));
        }
        if def.description.trim().is_empty() {
            violations.push(violation(self.name(), ViolationSeverity::Warning, "Empty description"));
        }
        if def.engine.trim().is_empty() {
            violations.push(violation(self.name(), ViolationSeverity::Warning, "Empty engine body"));
        }

        violations
    }
}

pub struct IdentifierRule;

impl ValidationRule for IdentifierRule {
    fn name(&self) -> &'static str { "identifier" }

    fn validate(&self, def: &EffectDefinition) -> Vec<ValidationViolation> {
        let mut violations = vec![];

        let bad_char = def.id.chars().any(|c| c.is_whitespace() || c == '/' || c == '\\');
        if def.id != def.id.to_lowercase() || bad_char {
            violations.push(ValidationViolation {
                actual: Some(def.id.clone()),
                expected: Some("lower-case, no whitespace or path separators".to_string()),
                ..violation(self.name(), ViolationSeverity::Error, "Id is not a usable file stem")
            });
        }

        let binding = def.binding();
        if !is_script_identifier(&binding) {
            violations.push(ValidationViolation {
                actual: Some(binding),
                expected: Some("[A-Za-z_$][A-Za-z0-9_$]*".to_string()),
                ..violation(self.name(), ViolationSeverity::Error, "Binding is not a valid identifier")
            });
        }

        violations
    }
}

pub struct TagsRule;

impl ValidationRule for TagsRule {
    fn name(&self) -> &'static str { "tags" }

    fn validate(&self, def: &EffectDefinition) -> Vec<ValidationViolation> {
        let mut violations = vec![];

        if def.tags.len() > MAX_TAGS {
            violations.push(ValidationViolation {
                expected: Some(format!("{} tags max", MAX_TAGS)),
                actual: Some(format!("{} tags", def.tags.len())),
                ..violation(self.name(), ViolationSeverity::Error, "Too many tags")
            });
        }

        let mut seen = std::collections::HashSet::new();
        if let Some(dup) = def.tags.iter().find(|t| !seen.insert(t.as_str())) {
            violations.push(ValidationViolation {
                actual: Some(dup.clone()),
                ..violation(self.name(), ViolationSeverity::Error, "Duplicate tag")
            });
        }

        violations
    }
}

/// Validator orchestrates rules and applies policy
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(RequiredFieldsRule),
                Box::new(IdentifierRule),
                Box::new(TagsRule),
            ],
        }
    }

    pub fn validate(&self, def: &EffectDefinition) -> ValidationResult {
        let violations: Vec<_> = self.rules.iter().flat_map(|rule| rule.validate(def)).collect();
        let valid = !violations.iter().any(|v| v.severity == ViolationSeverity::Error);

        ValidationResult {
            valid,
            violations,
            effect_id: def.id.clone(),
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::definition::{build_definition, EffectSource};

    fn def(name: &str, description: &str, code: &str) -> EffectDefinition {
        build_definition(&EffectSource::new(name, description, code), &classify(name, description))
    }

    #[test]
    fn test_well_formed_definition_passes() {
        let result = Validator::new().validate(&def("pulse-glow", "soft glow", "function f() {}"));
        assert!(result.valid);
        assert!(result.violations.is_empty());
    }

    #[test]
    fn test_empty_description_and_engine_warn() {
        let result = Validator::new().validate(&def("pulse-glow", "", ""));
        assert!(result.valid);
        assert_eq!(result.warnings().count(), 2);
    }

    #[test]
    fn test_numeric_leading_id_blocks() {
        let result = Validator::new().validate(&def("3d-spin", "spin", "x();"));
        assert!(!result.valid);
        assert!(result.error_summary().contains("identifier"));
    }

    #[test]
    fn test_tag_invariants() {
        let mut d = def("pulse-glow", "soft glow", "x();");
        d.tags = vec!["a".into(), "b".into(), "a".into()];
        let result = Validator::new().validate(&d);
        assert!(!result.valid);
        assert!(result.error_summary().contains("Duplicate tag"));

        d.tags = (0..7).map(|i| format!("t{}", i)).collect();
        assert!(!Validator::new().validate(&d).valid);
    }
}
