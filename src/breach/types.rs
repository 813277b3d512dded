//! Breach record types

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Breach record as supplied by a lookup source.
///
/// Untrusted: any field may be missing, null or of the wrong type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawBreachRecord {
    pub title: Option<String>,
    pub domain: Option<String>,
    /// May contain HTML markup
    pub description: Option<String>,
    pub breach_date: Option<String>,
    /// Kept as a raw JSON value; interpreted by truthiness
    pub is_verified: Option<serde_json::Value>,
    pub pwn_count: Option<u64>,
    pub data_classes: Option<Vec<String>>,
    pub logo_path: Option<String>,
}

impl RawBreachRecord {
    /// Read a record from a JSON object. Fields of the wrong type count as absent.
    ///
    /// Returns `None` only when `value` is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);

        Some(Self {
            title: text("Title"),
            domain: text("Domain"),
            description: text("Description"),
            breach_date: text("BreachDate"),
            is_verified: obj.get("IsVerified").filter(|v| !v.is_null()).cloned(),
            pwn_count: obj.get("PwnCount").and_then(parse_count),
            data_classes: obj.get("DataClasses").and_then(Value::as_array).map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            }),
            logo_path: text("LogoPath"),
        })
    }
}

impl<'de> Deserialize<'de> for RawBreachRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).ok_or_else(|| de::Error::custom("breach entry is not a JSON object"))
    }
}

/// Account count from a number or a numeric string such as `"152445165"`
fn parse_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}

/// Verification status shown on a breach card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreachStatus {
    Verified,
    Unverified,
}

impl std::fmt::Display for BreachStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Verified => write!(f, "Verified"),
            Self::Unverified => write!(f, "Unverified"),
        }
    }
}

/// Normalized breach ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreachResult {
    pub title: String,
    pub domain: String,
    /// Raw, unsanitized markup. Use [`BreachResult::sanitized_description`] to render.
    pub description: String,
    pub breach_date: String,
    pub status: BreachStatus,
    /// Grouped count such as `"152,445,165"`, or `"N/A"`
    pub accounts_affected: String,
    pub compromised_data: Vec<String>,
    pub logo: Option<String>,
}

impl BreachResult {
    /// Description with all markup outside the allowlist removed
    pub fn sanitized_description(&self) -> String {
        super::sanitize::sanitize_description(&self.description)
    }
}
