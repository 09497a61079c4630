use serde_json::Value;

use crate::{http::HttpClientHandle, ids::*, model::*};

/// Everything a view may ask the store to change. This set is closed: there is
/// no other way to write to `AppState`.
///
/// Variants carrying `Value` accept whatever the view produced and are coerced
/// when the action is planned; `None` inside them means the field was missing.
#[derive(Clone, Debug)]
pub enum Action {
    SetCurrentAudit(Audit),
    SetCurrentAuditUuid(AuditId),
    SetCurrentScan(Scan),
    SetCurrentScanUuid(ScanId),
    SetIsPolicyAccepted(Value),
    SetIsShownScanStatusDrawer(bool),
    SetStatus(Value),
    SetSnackbar { message: Option<Value>, is_error: Option<Value> },
    SetHttpClient(HttpClientHandle),
    SetToken(Option<String>),
    ForgetToken,
    UpdateScan(Scan),
}

impl Action {
    /// Snackbar action from a `{message, isError}` object as a view would pass it.
    pub fn snackbar_from_value(content: &Value) -> Self {
        Action::SetSnackbar {
            message: content.get("message").cloned(),
            is_error: content.get("isError").cloned(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::SetCurrentAudit(_) => "setCurrentAudit",
            Action::SetCurrentAuditUuid(_) => "setCurrentAuditUUID",
            Action::SetCurrentScan(_) => "setCurrentScan",
            Action::SetCurrentScanUuid(_) => "setCurrentScanUUID",
            Action::SetIsPolicyAccepted(_) => "setIsPolicyAccepted",
            Action::SetIsShownScanStatusDrawer(_) => "setIsShownScanStatusDrawer",
            Action::SetStatus(_) => "setStatus",
            Action::SetSnackbar { .. } => "setSnackbar",
            Action::SetHttpClient(_) => "setHTTPClient",
            Action::SetToken(_) => "setToken",
            Action::ForgetToken => "forgetToken",
            Action::UpdateScan(_) => "updateScan",
        }
    }
}
