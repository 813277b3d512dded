//! Mapping raw source records onto the display model

use super::types::{BreachResult, BreachStatus, RawBreachRecord};
use serde_json::Value;

/// Placeholder shown when a source does not report an account count
pub const NOT_AVAILABLE: &str = "N/A";

impl From<&RawBreachRecord> for BreachResult {
    fn from(raw: &RawBreachRecord) -> Self {
        let status = if raw.is_verified.as_ref().map(is_truthy).unwrap_or(false) {
            BreachStatus::Verified
        } else {
            BreachStatus::Unverified
        };

        Self {
            title: raw.title.clone().unwrap_or_default(),
            domain: raw.domain.clone().unwrap_or_default(),
            description: raw.description.clone().unwrap_or_default(),
            breach_date: raw.breach_date.clone().unwrap_or_default(),
            status,
            accounts_affected: raw
                .pwn_count
                .map(group_thousands)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            compromised_data: raw.data_classes.clone().unwrap_or_default(),
            logo: raw.logo_path.clone(),
        }
    }
}

impl From<RawBreachRecord> for BreachResult {
    fn from(raw: RawBreachRecord) -> Self {
        Self::from(&raw)
    }
}

/// Pick the record a search reports: the first one, in source order
pub fn select_first(records: &[RawBreachRecord]) -> Option<BreachResult> {
    records.first().map(BreachResult::from)
}

/// Format a count with comma thousands separators (en-US grouping)
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// JSON truthiness: null, false, 0 and "" are false
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(152445165), "152,445,165");
        assert_eq!(group_thousands(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn test_missing_count_is_not_available() {
        let result = BreachResult::from(RawBreachRecord::default());
        assert_eq!(result.accounts_affected, "N/A");
        assert_eq!(result.status, BreachStatus::Unverified);
        assert!(result.compromised_data.is_empty());
        assert!(result.logo.is_none());
    }

    #[test]
    fn test_full_record() {
        let raw: RawBreachRecord = serde_json::from_value(json!({
            "Title": "Adobe",
            "Domain": "adobe.com",
            "Description": "In October 2013, <a href=\"https://example.com\">153 million</a> accounts",
            "BreachDate": "2013-10-04",
            "IsVerified": true,
            "PwnCount": 152445165,
            "DataClasses": ["Email addresses", "Password hints", "Passwords", "Usernames"],
            "LogoPath": "https://example.com/Adobe.png"
        }))
        .unwrap();

        let result = BreachResult::from(&raw);
        assert_eq!(result.title, "Adobe");
        assert_eq!(result.domain, "adobe.com");
        assert_eq!(result.breach_date, "2013-10-04");
        assert_eq!(result.status, BreachStatus::Verified);
        assert_eq!(result.accounts_affected, "152,445,165");
        assert_eq!(result.compromised_data[1], "Password hints");
        assert_eq!(result.logo.as_deref(), Some("https://example.com/Adobe.png"));
        // passed through untouched
        assert!(result.description.contains("<a href="));
    }

    #[test]
    fn test_verification_truthiness() {
        let cases = [
            (json!(true), BreachStatus::Verified),
            (json!(1), BreachStatus::Verified),
            (json!("yes"), BreachStatus::Verified),
            (json!(false), BreachStatus::Unverified),
            (json!(0), BreachStatus::Unverified),
            (json!(""), BreachStatus::Unverified),
            (json!(null), BreachStatus::Unverified),
        ];

        for (flag, expected) in cases {
            let raw = RawBreachRecord {
                is_verified: Some(flag.clone()),
                ..Default::default()
            };
            assert_eq!(BreachResult::from(raw).status, expected, "flag {}", flag);
        }
    }

    #[test]
    fn test_select_first_keeps_source_order() {
        let records = vec![
            RawBreachRecord {
                title: Some("Zynga".to_string()),
                pwn_count: Some(10),
                ..Default::default()
            },
            RawBreachRecord {
                title: Some("Adobe".to_string()),
                pwn_count: Some(152445165),
                ..Default::default()
            },
        ];

        let selected = select_first(&records).unwrap();
        assert_eq!(selected.title, "Zynga");
        assert!(select_first(&[]).is_none());
    }
}
