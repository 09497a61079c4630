use serde::Serialize;

use crate::{classify::scan_status, http::HttpClientHandle, ids::*, model::*};

/// Persistence key holding the bearer token.
pub const TOKEN_KEY: &str = "NTD_TOKEN";
/// Persistence key holding `"true"` once the usage policy was accepted.
pub const POLICY_ACCEPTED_KEY: &str = "NTD_POLICY_ACCEPTED";

/// Deployment settings read once at startup. Not validated here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiSettings {
    pub endpoint: String,
    pub timeout_ms: u64,
    pub source_ip_address: Option<String>,
}

/// The two values that survive a restart, as read back from storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PersistedSession {
    pub token: Option<String>,
    pub is_policy_accepted: bool,
}

impl PersistedSession {
    /// Builds the session from raw stored strings. Acceptance is only true for
    /// the exact string `"true"`.
    pub fn from_raw(token: Option<String>, policy_accepted: Option<&str>) -> Self {
        Self {
            token,
            is_policy_accepted: policy_accepted == Some("true"),
        }
    }
}

/// Shared client state. Views read it through `&AppState`; every change goes
/// through an `Action`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct AppState {
    pub api_endpoint: String,
    pub api_timeout_ms: u64,
    pub source_ip_address: Option<String>,
    pub current_audit: Audit,
    pub current_audit_uuid: AuditId,
    pub current_scan: Scan,
    pub current_scan_uuid: ScanId,
    pub is_policy_accepted: bool,
    pub is_shown_scan_status_drawer: bool,
    pub status: StatusCode,
    pub snackbar: Snackbar,
    pub token: Option<String>,
    #[serde(skip)]
    pub http_client: Option<HttpClientHandle>,
}

impl AppState {
    pub fn initial(settings: ApiSettings, session: PersistedSession) -> Self {
        Self {
            api_endpoint: settings.endpoint,
            api_timeout_ms: settings.timeout_ms,
            source_ip_address: settings.source_ip_address,
            token: session.token,
            is_policy_accepted: session.is_policy_accepted,
            ..Self::default()
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Label for the scan in the detail view; `Unknown` until one is loaded.
    pub fn current_scan_status(&self) -> ScanStatus {
        if self.current_scan.uuid.is_empty() {
            ScanStatus::Unknown
        } else {
            scan_status(&self.current_scan)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_flag_needs_exact_true() {
        assert!(PersistedSession::from_raw(None, Some("true")).is_policy_accepted);
        assert!(!PersistedSession::from_raw(None, Some("TRUE")).is_policy_accepted);
        assert!(!PersistedSession::from_raw(None, Some("1")).is_policy_accepted);
        assert!(!PersistedSession::from_raw(None, None).is_policy_accepted);
    }

    #[test]
    fn initial_state_takes_settings_and_session() {
        let state = AppState::initial(
            ApiSettings {
                endpoint: "https://api.example.com".into(),
                timeout_ms: 5000,
                source_ip_address: Some("203.0.113.7".into()),
            },
            PersistedSession { token: Some("tok".into()), is_policy_accepted: true },
        );
        assert_eq!(state.api_endpoint, "https://api.example.com");
        assert_eq!(state.api_timeout_ms, 5000);
        assert_eq!(state.source_ip_address.as_deref(), Some("203.0.113.7"));
        assert!(state.is_authenticated());
        assert!(state.is_policy_accepted);
        assert_eq!(state.status, StatusCode::Code(0));
        assert!(state.current_audit.scans.is_empty());
        assert!(!state.is_shown_scan_status_drawer);
        assert_eq!(state.snackbar, Snackbar::default());
        assert!(state.http_client.is_none());
    }

    #[test]
    fn current_scan_status_is_unknown_until_loaded() {
        let mut state = AppState::default();
        assert_eq!(state.current_scan_status(), ScanStatus::Unknown);
        state.current_scan.uuid = ScanId::from_str("s1");
        assert_eq!(state.current_scan_status(), ScanStatus::Unscheduled);
    }

    #[test]
    fn serialized_state_omits_http_client() {
        let mut state = AppState::default();
        state.http_client = Some(HttpClientHandle::new(()));
        let v = serde_json::to_value(&state).unwrap();
        assert!(v.get("http_client").is_none());
        assert_eq!(v["status"], serde_json::json!(0));
    }
}
