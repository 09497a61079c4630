use std::any::Any;

use anyhow::{Context, Result};
use ntd_core::{
    plan, reduce, Action, ApiSettings, AppState, Audit, AuditId, Commit, HttpClientHandle, Plan, Scan, ScanId,
};
use ntd_storage::{apply_effect, load_session, KeyValueStorage};
use serde_json::Value;
use tracing::{debug, info, warn};

pub type Listener = Box<dyn Fn(&Commit, &AppState) + Send>;

/// Owner of the client's `AppState`.
///
/// Build one at startup and pass it to whatever renders. Reads go through
/// [`Store::state`]; writes only through [`Store::dispatch`] or the named
/// helpers below, which persist first and commit second so a failed storage
/// write leaves memory untouched.
pub struct Store {
    state: AppState,
    storage: Box<dyn KeyValueStorage>,
    listeners: Vec<Listener>,
}

impl Store {
    pub fn open(settings: ApiSettings, storage: Box<dyn KeyValueStorage>) -> Result<Self> {
        let session = load_session(storage.as_ref()).context("read persisted session")?;
        info!(
            endpoint = %settings.endpoint,
            authenticated = session.token.is_some(),
            policy_accepted = session.is_policy_accepted,
            "store opened"
        );
        Ok(Self {
            state: AppState::initial(settings, session),
            storage,
            listeners: vec![],
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn storage(&self) -> &dyn KeyValueStorage {
        self.storage.as_ref()
    }

    /// Called after every commit that changed state.
    pub fn subscribe(&mut self, listener: impl Fn(&Commit, &AppState) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// The injected HTTP client, if one of type `T` was set.
    pub fn http_client<T: Any>(&self) -> Option<&T> {
        self.state.http_client.as_ref().and_then(|c| c.downcast_ref::<T>())
    }

    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        let name = action.name();
        let scan_uuid = match &action {
            Action::UpdateScan(scan) => Some(scan.uuid.clone()),
            _ => None,
        };

        let Plan { effects, mutation } = plan(action);
        for effect in &effects {
            apply_effect(self.storage.as_ref(), effect).with_context(|| format!("{name}: write local storage"))?;
        }

        let (state, commit) = reduce(std::mem::take(&mut self.state), mutation);
        self.state = state;

        if !commit.changed {
            warn!(action = name, scan = ?scan_uuid, "no scan with that uuid in the current audit");
            return Ok(());
        }
        debug!(action = name, kind = ?commit.kind, "committed");
        for listener in &self.listeners {
            listener(&commit, &self.state);
        }
        Ok(())
    }

    pub fn set_current_audit(&mut self, audit: Audit) -> Result<()> {
        self.dispatch(Action::SetCurrentAudit(audit))
    }

    pub fn set_current_audit_uuid(&mut self, uuid: AuditId) -> Result<()> {
        self.dispatch(Action::SetCurrentAuditUuid(uuid))
    }

    pub fn set_current_scan(&mut self, scan: Scan) -> Result<()> {
        self.dispatch(Action::SetCurrentScan(scan))
    }

    pub fn set_current_scan_uuid(&mut self, uuid: ScanId) -> Result<()> {
        self.dispatch(Action::SetCurrentScanUuid(uuid))
    }

    pub fn set_is_policy_accepted(&mut self, accepted: impl Into<Value>) -> Result<()> {
        self.dispatch(Action::SetIsPolicyAccepted(accepted.into()))
    }

    pub fn set_is_shown_scan_status_drawer(&mut self, shown: bool) -> Result<()> {
        self.dispatch(Action::SetIsShownScanStatusDrawer(shown))
    }

    pub fn set_status(&mut self, status: impl Into<Value>) -> Result<()> {
        self.dispatch(Action::SetStatus(status.into()))
    }

    pub fn set_snackbar(&mut self, message: impl Into<Value>, is_error: impl Into<Value>) -> Result<()> {
        self.dispatch(Action::SetSnackbar {
            message: Some(message.into()),
            is_error: Some(is_error.into()),
        })
    }

    pub fn set_http_client(&mut self, client: HttpClientHandle) -> Result<()> {
        self.dispatch(Action::SetHttpClient(client))
    }

    pub fn set_token(&mut self, token: Option<String>) -> Result<()> {
        let signing_in = token.is_some();
        self.dispatch(Action::SetToken(token))?;
        info!(signed_in = signing_in, "token updated");
        Ok(())
    }

    pub fn forget_token(&mut self) -> Result<()> {
        self.dispatch(Action::ForgetToken)?;
        info!("token forgotten");
        Ok(())
    }

    pub fn update_scan(&mut self, scan: Scan) -> Result<()> {
        self.dispatch(Action::UpdateScan(scan))
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
