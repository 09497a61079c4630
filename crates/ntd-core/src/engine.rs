use serde_json::Value;

use crate::{
    coerce::{js_string, parse_int, string_flag},
    AppState, Action, Commit, Effect, Mutation, Snackbar, POLICY_ACCEPTED_KEY, TOKEN_KEY,
};

/// What the shell must do for one action: apply `effects` to storage in
/// order, then commit `mutation`.
#[derive(Clone, Debug)]
pub struct Plan {
    pub effects: Vec<Effect>,
    pub mutation: Mutation,
}

impl Plan {
    fn commit(mutation: Mutation) -> Self {
        Self { effects: vec![], mutation }
    }
}

/// Normalises an action's input and splits it into storage effects and the
/// state mutation. Pure; never fails.
pub fn plan(action: Action) -> Plan {
    match action {
        Action::SetCurrentAudit(audit) => Plan::commit(Mutation::SetCurrentAudit(audit)),
        Action::SetCurrentAuditUuid(uuid) => Plan::commit(Mutation::SetCurrentAuditUuid(uuid)),
        Action::SetCurrentScan(scan) => Plan::commit(Mutation::SetCurrentScan(scan)),
        Action::SetCurrentScanUuid(uuid) => Plan::commit(Mutation::SetCurrentScanUuid(uuid)),
        Action::SetIsPolicyAccepted(value) => {
            let accepted = policy_flag(&value);
            Plan {
                effects: vec![Effect::Persist { key: POLICY_ACCEPTED_KEY, value: accepted.to_string() }],
                mutation: Mutation::SetIsPolicyAccepted(accepted),
            }
        }
        Action::SetIsShownScanStatusDrawer(shown) => Plan::commit(Mutation::SetIsShownScanStatusDrawer(shown)),
        Action::SetStatus(value) => Plan::commit(Mutation::SetStatus(parse_int(Some(&value)))),
        Action::SetSnackbar { message, is_error } => Plan::commit(Mutation::SetSnackbar(Snackbar {
            message: js_string(message.as_ref()),
            is_error: string_flag(is_error.as_ref()),
        })),
        Action::SetHttpClient(client) => Plan::commit(Mutation::SetHttpClient(client)),
        Action::SetToken(Some(token)) => Plan {
            effects: vec![Effect::Persist { key: TOKEN_KEY, value: token.clone() }],
            mutation: Mutation::SetToken(Some(token)),
        },
        Action::SetToken(None) | Action::ForgetToken => Plan {
            effects: vec![Effect::Remove { key: TOKEN_KEY }],
            mutation: Mutation::SetToken(None),
        },
        Action::UpdateScan(scan) => Plan::commit(Mutation::UpdateScan(scan)),
    }
}

/// Same rule as snackbar errors. The stored form is always `"true"` or `"false"`.
fn policy_flag(value: &Value) -> bool {
    string_flag(Some(value))
}

/// Applies one mutation. Pure: (old state, mutation) -> (new state, commit).
pub fn reduce(mut state: AppState, mutation: Mutation) -> (AppState, Commit) {
    let kind = mutation.kind();
    let mut changed = true;
    match mutation {
        Mutation::SetCurrentAudit(audit) => state.current_audit = audit,
        Mutation::SetCurrentAuditUuid(uuid) => state.current_audit_uuid = uuid,
        Mutation::SetCurrentScan(scan) => state.current_scan = scan,
        Mutation::SetCurrentScanUuid(uuid) => state.current_scan_uuid = uuid,
        Mutation::SetIsPolicyAccepted(accepted) => state.is_policy_accepted = accepted,
        Mutation::SetIsShownScanStatusDrawer(shown) => state.is_shown_scan_status_drawer = shown,
        Mutation::SetStatus(status) => state.status = status,
        Mutation::SetSnackbar(snackbar) => state.snackbar = snackbar,
        Mutation::SetHttpClient(client) => state.http_client = Some(client),
        Mutation::SetToken(token) => state.token = token,
        Mutation::UpdateScan(scan) => {
            // no match: leave the list alone
            match state.current_audit.scans.iter().position(|s| s.uuid == scan.uuid) {
                Some(index) => state.current_audit.scans[index] = scan,
                None => changed = false,
            }
        }
    }
    (state, Commit { kind, changed })
}
