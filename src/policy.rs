//! Company expense policies, shown read-only on the dashboard.
//!
//! Policies are never evaluated here. The `flagged` field on each expense is
//! the only record of whether a policy was broken.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Error;

/// The number of policies shown on the dashboard.
pub const DASHBOARD_POLICY_LIMIT: usize = 3;

/// How strictly a policy is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyType {
    /// Expenses breaking the policy are never allowed.
    Hard,
    /// Expenses breaking the policy are allowed but reported.
    Soft,
}

/// A company expense policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecord {
    /// The ID of the policy.
    pub id: i64,
    /// The policy name.
    pub name: String,
    /// What the policy is for.
    #[serde(default)]
    pub description: Option<String>,
    /// The expense category the policy applies to.
    pub category: String,
    /// The kind of rule, e.g. "amount_max" or "merchant_blacklist".
    #[serde(default)]
    pub rule_type: String,
    /// The rule's parameter: a number for amount limits, a list for
    /// blacklists, or anything else the rule type needs.
    #[serde(default)]
    pub rule_value: Value,
    /// How strictly the policy is enforced.
    #[serde(default)]
    pub policy_type: Option<PolicyType>,
}

impl PolicyRecord {
    /// The rule value as shown to the user.
    ///
    /// Numbers, including numeric strings, are shown as dollars. Lists are
    /// joined with commas. Missing or blank values are "N/A".
    pub fn restriction_label(&self) -> String {
        match &self.rule_value {
            Value::Null => "N/A".to_owned(),
            Value::Number(number) => match number.as_f64() {
                Some(amount) => format_amount(amount),
                None => number.to_string(),
            },
            Value::String(text) => {
                let text = text.trim();

                if text.is_empty() {
                    return "N/A".to_owned();
                }

                match text.parse::<f64>() {
                    Ok(amount) if amount.is_finite() => format_amount(amount),
                    _ => text.to_owned(),
                }
            }
            Value::Array(values) => values
                .iter()
                .map(|value| match value {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
            other => other.to_string(),
        }
    }
}

fn format_amount(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Parse a JSON array of policies.
///
/// # Errors
/// Returns [Error::InvalidPoliciesJSON] if `text` is not a JSON array of policies.
pub fn parse_policies_json(text: &str) -> Result<Vec<PolicyRecord>, Error> {
    serde_json::from_str(text).map_err(|error| Error::InvalidPoliciesJSON(error.to_string()))
}

/// Read and parse the JSON policy list at `path`.
///
/// # Errors
/// Returns [Error::ReadError] if the file cannot be read, or
/// [Error::InvalidPoliciesJSON] if its contents are not a JSON array of policies.
pub fn load_policies(path: &Path) -> Result<Vec<PolicyRecord>, Error> {
    let text = std::fs::read_to_string(path)
        .map_err(|error| Error::ReadError(path.display().to_string(), error.to_string()))?;

    let policies = parse_policies_json(&text)?;
    tracing::debug!("Loaded {} policies from {}", policies.len(), path.display());

    Ok(policies)
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::Error;

    use super::{PolicyRecord, PolicyType, parse_policies_json};

    fn policy_with_rule(rule_value: Value) -> PolicyRecord {
        PolicyRecord {
            id: 1,
            name: "Meal limit".to_owned(),
            description: None,
            category: "food".to_owned(),
            rule_type: "amount_max".to_owned(),
            rule_value,
            policy_type: Some(PolicyType::Soft),
        }
    }

    #[test]
    fn numeric_rule_values_are_dollars() {
        assert_eq!(policy_with_rule(json!(50)).restriction_label(), "$50.00");
        assert_eq!(policy_with_rule(json!(12.5)).restriction_label(), "$12.50");
        assert_eq!(policy_with_rule(json!(" 75 ")).restriction_label(), "$75.00");
    }

    #[test]
    fn other_rule_values_are_shown_as_is() {
        assert_eq!(
            policy_with_rule(json!("economy class only")).restriction_label(),
            "economy class only"
        );
        assert_eq!(
            policy_with_rule(json!(["Casino", "Bar"])).restriction_label(),
            "Casino, Bar"
        );
    }

    #[test]
    fn missing_rule_value_is_not_applicable() {
        assert_eq!(policy_with_rule(Value::Null).restriction_label(), "N/A");
        assert_eq!(policy_with_rule(json!("  ")).restriction_label(), "N/A");
    }

    #[test]
    fn parses_policy_list() {
        let text = r#"[
            {"id": 1, "name": "Meal limit", "category": "food", "rule_type": "amount_max",
             "rule_value": 50, "policy_type": "soft"},
            {"id": 2, "name": "No casinos", "description": "Gambling is not reimbursed",
             "category": "other", "rule_type": "merchant_blacklist",
             "rule_value": ["Casino"], "policy_type": "hard"}
        ]"#;

        let policies = parse_policies_json(text).unwrap();

        assert_eq!(policies.len(), 2);
        assert_eq!(policies[0], policy_with_rule(json!(50)));
        assert_eq!(policies[1].policy_type, Some(PolicyType::Hard));
        assert_eq!(
            policies[1].description.as_deref(),
            Some("Gambling is not reimbursed")
        );
    }

    #[test]
    fn rejects_malformed_json() {
        let result = parse_policies_json(r#"[{"id": "one"}]"#);

        assert!(matches!(result, Err(Error::InvalidPoliciesJSON(_))));
    }
}
