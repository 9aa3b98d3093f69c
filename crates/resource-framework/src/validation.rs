//! Declarative field constraints and the evaluator that checks a form snapshot
//! against them. Pure logic, no I/O.

use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, OnceLock};

/// One constraint on one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    Required,
    MaxLength(usize),
    Min(i64),
    Max(i64),
    Pattern(&'static str),
}

impl Constraint {
    pub fn kind(&self) -> &'static str {
        match self {
            Constraint::Required => "required",
            Constraint::MaxLength(_) => "maxlength",
            Constraint::Min(_) => "min",
            Constraint::Max(_) => "max",
            Constraint::Pattern(_) => "pattern",
        }
    }
}

/// The constraints declared for a field (wire name).
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub constraints: &'static [Constraint],
}

impl FieldRule {
    pub const fn new(field: &'static str, constraints: &'static [Constraint]) -> Self {
        Self { field, constraints }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub constraint: Constraint,
    pub message: String,
}

/// Result of evaluating every rule against one snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub violations: Vec<FieldViolation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations for a single field, in rule order.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldViolation> + 'a {
        self.violations.iter().filter(move |v| v.field == field)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .violations
            .iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Evaluates `rules` against a JSON object (`serde_json::to_value(form)`).
///
/// Only `required` enforces presence; the other constraints pass on absent or null
/// values.
pub fn validate(rules: &[FieldRule], snapshot: &Value) -> ValidationReport {
    let mut violations = Vec::new();
    for rule in rules {
        let value = snapshot.get(rule.field);
        for constraint in rule.constraints {
            if let Some(message) = check(constraint, value) {
                violations.push(FieldViolation {
                    field: rule.field,
                    constraint: *constraint,
                    message,
                });
            }
        }
    }
    ValidationReport { violations }
}

fn check(constraint: &Constraint, value: Option<&Value>) -> Option<String> {
    let value = match (constraint, value) {
        (Constraint::Required, None | Some(Value::Null)) => {
            return Some("This field is required.".to_string())
        }
        (Constraint::Required, Some(Value::String(s))) if s.trim().is_empty() => {
            return Some("This field is required.".to_string())
        }
        (Constraint::Required, _) => return None,
        (_, None | Some(Value::Null)) => return None,
        (_, Some(v)) => v,
    };

    match constraint {
        Constraint::Required => None,
        Constraint::MaxLength(max) => {
            let len = value.as_str()?.chars().count();
            (len > *max).then(|| format!("This field cannot be longer than {max} characters."))
        }
        Constraint::Min(min) => {
            let n = value.as_f64()?;
            (n < *min as f64).then(|| format!("This field should be at least {min}."))
        }
        Constraint::Max(max) => {
            let n = value.as_f64()?;
            (n > *max as f64).then(|| format!("This field cannot be more than {max}."))
        }
        Constraint::Pattern(pattern) => {
            let s = value.as_str()?;
            match matches_pattern(pattern, s) {
                Some(true) => None,
                Some(false) => Some(format!("This field should follow pattern {pattern}.")),
                None => Some(format!("Invalid pattern {pattern}.")),
            }
        }
    }
}

/// Compiled patterns, keyed by source. `None` for a pattern that does not compile.
fn matches_pattern(pattern: &'static str, s: &str) -> Option<bool> {
    static CACHE: OnceLock<Mutex<HashMap<&'static str, Option<Regex>>>> = OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    let mut cache = cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let compiled = cache
        .entry(pattern)
        .or_insert_with(|| Regex::new(pattern).ok());
    compiled.as_ref().map(|re| re.is_match(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const RULES: &[FieldRule] = &[
        FieldRule::new(
            "customerRef",
            &[Constraint::Required, Constraint::Pattern(r"^FGR-CUST-[0-9]{8}$")],
        ),
        FieldRule::new("phoneNumber", &[Constraint::MaxLength(20)]),
        FieldRule::new("attempts", &[Constraint::Required, Constraint::Min(0), Constraint::Max(3)]),
    ];

    #[test]
    fn valid_snapshot_passes() {
        let report = validate(
            RULES,
            &json!({ "customerRef": "FGR-CUST-00000042", "phoneNumber": null, "attempts": 3 }),
        );
        assert!(report.is_valid(), "{report}");
    }

    #[test]
    fn missing_required_and_bad_pattern_are_reported() {
        let report = validate(RULES, &json!({ "customerRef": "CUST-1", "attempts": null }));
        let kinds: Vec<_> = report.violations.iter().map(|v| (v.field, v.constraint.kind())).collect();
        assert_eq!(kinds, vec![("customerRef", "pattern"), ("attempts", "required")]);
    }

    #[test]
    fn blank_string_counts_as_missing() {
        let report = validate(RULES, &json!({ "customerRef": "  ", "attempts": 0 }));
        assert_eq!(report.for_field("customerRef").count(), 2);
    }

    #[test]
    fn range_and_length_limits() {
        let report = validate(
            RULES,
            &json!({
                "customerRef": "FGR-CUST-12345678",
                "phoneNumber": "0".repeat(21),
                "attempts": 4
            }),
        );
        let kinds: Vec<_> = report.violations.iter().map(|v| v.constraint.kind()).collect();
        assert_eq!(kinds, vec!["maxlength", "max"]);
    }
}
