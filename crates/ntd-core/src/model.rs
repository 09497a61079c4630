use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::ids::*;

/// A single scanning task as returned by the audit API.
///
/// Timestamps and `rrule` are kept as the raw strings the API sent; an empty
/// string counts as absent. Fields this client does not model are kept in
/// `extra` so that replacing a scan never drops data.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Scan {
    #[serde(default)]
    pub uuid: ScanId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target: String,
    #[serde(default)]
    pub scheduled_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub max_duration: i64,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub ended_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub error_reason: String,
    #[serde(default)]
    pub rrule: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub detection_module: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub detection_mode: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Scan {
    pub fn scheduled_at(&self) -> Option<&str> {
        present(&self.scheduled_at)
    }

    pub fn started_at(&self) -> Option<&str> {
        present(&self.started_at)
    }

    pub fn ended_at(&self) -> Option<&str> {
        present(&self.ended_at)
    }

    pub fn rrule(&self) -> Option<&str> {
        present(&self.rrule)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Integration {
    #[serde(default, deserialize_with = "null_as_default")]
    pub service: String,
}

/// A top-level grouping of scans.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Audit {
    #[serde(default)]
    pub uuid: AuditId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_by: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_by: String,
    #[serde(default)]
    pub source_ip_address: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scans: Vec<Scan>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub integrations: Vec<Integration>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Audit {
    pub fn scan(&self, uuid: &ScanId) -> Option<&Scan> {
        self.scans.iter().find(|s| &s.uuid == uuid)
    }
}

/// Transient notification shown at the bottom of the screen.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Snackbar {
    pub message: String,
    pub is_error: bool,
}

/// Generic UI status/phase code.
///
/// `NotANumber` is what an unparsable `setStatus` input becomes; it is kept
/// distinct so bad input is visible instead of collapsing to zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusCode {
    Code(i64),
    NotANumber,
}

impl Default for StatusCode {
    fn default() -> Self {
        StatusCode::Code(0)
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusCode::Code(n) => write!(f, "{n}"),
            StatusCode::NotANumber => f.write_str("NaN"),
        }
    }
}

impl Serialize for StatusCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StatusCode::Code(n) => serializer.serialize_i64(*n),
            StatusCode::NotANumber => serializer.serialize_str("NaN"),
        }
    }
}

/// Display label derived from a scan's fields.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ScanStatus {
    /// No scan loaded yet.
    #[default]
    Unknown,
    Scheduled,
    Scanning,
    Failed,
    Completed,
    Unscheduled,
}

impl ScanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanStatus::Unknown => "Unknown",
            ScanStatus::Scheduled => "Scheduled",
            ScanStatus::Scanning => "Scanning",
            ScanStatus::Failed => "Failed",
            ScanStatus::Completed => "Completed",
            ScanStatus::Unscheduled => "Unscheduled",
        }
    }
}

impl std::fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

// The API sends `null` for some string columns.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scan_keeps_unknown_fields() {
        let scan: Scan = serde_json::from_value(json!({
            "uuid": "s1",
            "target": "https://example.com",
            "error_reason": null,
            "task_uuid": "t1",
        }))
        .unwrap();
        assert_eq!(scan.uuid, ScanId::from_str("s1"));
        assert_eq!(scan.error_reason, "");
        assert_eq!(scan.extra.get("task_uuid"), Some(&json!("t1")));

        let back = serde_json::to_value(&scan).unwrap();
        assert_eq!(back["task_uuid"], json!("t1"));
    }

    #[test]
    fn empty_timestamps_read_as_absent() {
        let scan = Scan {
            scheduled_at: Some(String::new()),
            rrule: Some("FREQ=DAILY".into()),
            ..Scan::default()
        };
        assert_eq!(scan.scheduled_at(), None);
        assert_eq!(scan.rrule(), Some("FREQ=DAILY"));
    }

    #[test]
    fn snackbar_uses_camel_case() {
        let v = serde_json::to_value(Snackbar { message: "m".into(), is_error: true }).unwrap();
        assert_eq!(v, json!({"message": "m", "isError": true}));
    }

    #[test]
    fn status_code_serializes_nan_as_string() {
        assert_eq!(serde_json::to_value(StatusCode::Code(3)).unwrap(), json!(3));
        assert_eq!(serde_json::to_value(StatusCode::NotANumber).unwrap(), json!("NaN"));
        assert_eq!(StatusCode::default(), StatusCode::Code(0));
    }

    #[test]
    fn audit_finds_scan_by_uuid() {
        let audit: Audit = serde_json::from_value(json!({
            "uuid": "a1",
            "scans": [{"uuid": "s1"}, {"uuid": "s2", "name": "second"}],
        }))
        .unwrap();
        assert_eq!(audit.scan(&ScanId::from_str("s2")).unwrap().name, "second");
        assert!(audit.scan(&ScanId::from_str("s3")).is_none());
    }
}
