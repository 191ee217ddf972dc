//! Data structures for the filter engine's tree
//!
//! A filter is a tree of groups and conditions rooted at a single group.
//! Conditions are leaves; groups combine their children with a conjunction.

use serde::{Deserialize, Serialize};

/// The id carried by the top-level group. The root is never removed by
/// tree-editing operations.
pub const ROOT_GROUP_ID: &str = "root";

/// Transaction field a condition tests against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    Date,
    Amount,
    Narration,
    Account,
    Tag,
}

/// Comparison operator. Each field admits a fixed subset; combinations
/// outside the table evaluate to false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    Is,
    IsNot,
    IsOn,
    IsBefore,
    IsAfter,
    GreaterThan,
    LessThan,
    Contains,
    DoesNotContain,
    StartsWith,
    EndsWith,
    IsBlank,
    IsNotBlank,
}

/// The legal operators for a field, in display order
pub fn valid_operators(field: FilterField) -> &'static [FilterOperator] {
    use FilterOperator::*;
    match field {
        FilterField::Date => &[IsOn, IsNot, IsBefore, IsAfter],
        FilterField::Amount => &[Is, IsNot, GreaterThan, LessThan],
        FilterField::Narration => &[
            Is,
            IsNot,
            Contains,
            DoesNotContain,
            StartsWith,
            EndsWith,
            IsBlank,
            IsNotBlank,
        ],
        FilterField::Account => &[Is, IsNot, Contains, DoesNotContain],
        FilterField::Tag => &[Contains, DoesNotContain, IsBlank, IsNotBlank],
    }
}

/// A condition value: free text or a number, depending on the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(f64),
    Text(String),
}

impl FilterValue {
    /// Numeric view of the value. Text values are parsed leniently: a
    /// leading float prefix counts (so "12abc" is 12), anything else is
    /// `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FilterValue::Number(n) => Some(*n),
            FilterValue::Text(s) => parse_float_prefix(s),
        }
    }

    /// Text view of the value. Numbers are rendered without a trailing
    /// fractional part when whole.
    pub fn as_text(&self) -> String {
        match self {
            FilterValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            FilterValue::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        FilterValue::Number(n)
    }
}

/// Parse the leading float prefix of a string: optional sign, digits,
/// fraction and exponent. Leading whitespace is skipped.
fn parse_float_prefix(s: &str) -> Option<f64> {
    let t = s.trim_start();
    let bytes = t.as_bytes();
    let mut end = 0;
    let mut saw_digit = false;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    while bytes.get(end).is_some_and(|b| b.is_ascii_digit()) {
        end += 1;
        saw_digit = true;
    }
    if bytes.get(end) == Some(&b'.') {
        end += 1;
        while bytes.get(end).is_some_and(|b| b.is_ascii_digit()) {
            end += 1;
            saw_digit = true;
        }
    }
    if !saw_digit {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(|b| b.is_ascii_digit()) {
            exp_end += 1;
        }
        // the exponent only counts if it has at least one digit
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    t[..end].parse().ok()
}

/// A single filter rule (leaf node)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    pub id: String,
    pub field: FilterField,
    pub operator: FilterOperator,
    pub value: FilterValue,
    /// Second value for range operators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value2: Option<FilterValue>,
}

/// How a group combines its children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Conjunction {
    And,
    Or,
}

/// A group of conditions or nested groups (internal node)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterGroup {
    pub id: String,
    pub conjunction: Conjunction,
    pub children: Vec<FilterNode>,
}

/// A node in the filter tree: either a leaf condition or a nested group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterNode {
    Condition(FilterCondition),
    Group(FilterGroup),
}

impl FilterNode {
    pub fn id(&self) -> &str {
        match self {
            FilterNode::Condition(c) => &c.id,
            FilterNode::Group(g) => &g.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("12.5"), Some(12.5));
        assert_eq!(parse_float_prefix("  -3"), Some(-3.0));
        assert_eq!(parse_float_prefix("12abc"), Some(12.0));
        assert_eq!(parse_float_prefix("1e3"), Some(1000.0));
        assert_eq!(parse_float_prefix("1e"), Some(1.0));
        assert_eq!(parse_float_prefix("abc"), None);
        assert_eq!(parse_float_prefix(""), None);
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
    }

    #[test]
    fn test_value_as_number() {
        assert_eq!(FilterValue::Number(3.0).as_number(), Some(3.0));
        assert_eq!(FilterValue::from("100").as_number(), Some(100.0));
        assert_eq!(FilterValue::from("oops").as_number(), None);
    }

    #[test]
    fn test_serde_shape() {
        let json = r#"{
            "id": "root",
            "conjunction": "and",
            "children": [
                { "id": "c1", "field": "amount", "operator": "greater_than", "value": 100 },
                {
                    "id": "g1",
                    "conjunction": "or",
                    "children": [
                        { "id": "c2", "field": "narration", "operator": "contains", "value": "coffee" }
                    ]
                }
            ]
        }"#;
        let group: FilterGroup = serde_json::from_str(json).unwrap();
        assert_eq!(group.id, "root");
        assert_eq!(group.conjunction, Conjunction::And);
        assert_eq!(group.children.len(), 2);
        match &group.children[0] {
            FilterNode::Condition(c) => {
                assert_eq!(c.field, FilterField::Amount);
                assert_eq!(c.operator, FilterOperator::GreaterThan);
                assert_eq!(c.value, FilterValue::Number(100.0));
            }
            FilterNode::Group(_) => panic!("expected condition"),
        }
        match &group.children[1] {
            FilterNode::Group(g) => assert_eq!(g.conjunction, Conjunction::Or),
            FilterNode::Condition(_) => panic!("expected group"),
        }

        // round-trips through JSON
        let text = serde_json::to_string(&group).unwrap();
        let again: FilterGroup = serde_json::from_str(&text).unwrap();
        assert_eq!(group, again);
    }
}
