use ntd_core::{
    plan, reduce, Action, ApiSettings, AppState, Audit, AuditId, Effect, MutationKind, PersistedSession, Scan, ScanId,
    ScanStatus, Snackbar, StatusCode, POLICY_ACCEPTED_KEY, TOKEN_KEY,
};
use serde_json::json;

fn dispatch(state: AppState, action: Action) -> (AppState, Vec<Effect>) {
    let p = plan(action);
    let (state, _) = reduce(state, p.mutation);
    (state, p.effects)
}

fn scan(uuid: &str) -> Scan {
    Scan { uuid: ScanId::from_str(uuid), ..Scan::default() }
}

#[test]
fn test_fresh_state_has_no_session() {
    let state = AppState::initial(ApiSettings::default(), PersistedSession::from_raw(None, None));
    assert_eq!(state.token, None);
    assert!(!state.is_policy_accepted);
    assert!(!state.is_authenticated());
}

#[test]
fn test_token_roundtrip_effects() {
    let (state, effects) = dispatch(AppState::default(), Action::SetToken(Some("abc123".into())));
    assert_eq!(effects, vec![Effect::Persist { key: TOKEN_KEY, value: "abc123".into() }]);
    assert_eq!(state.token.as_deref(), Some("abc123"));

    let (state, effects) = dispatch(state, Action::ForgetToken);
    assert_eq!(effects, vec![Effect::Remove { key: TOKEN_KEY }]);
    assert_eq!(state.token, None);
}

#[test]
fn test_policy_accepted_from_bool_and_string() {
    let (state, effects) = dispatch(AppState::default(), Action::SetIsPolicyAccepted(json!(true)));
    assert_eq!(effects, vec![Effect::Persist { key: POLICY_ACCEPTED_KEY, value: "true".into() }]);
    assert!(state.is_policy_accepted);

    let (state, effects) = dispatch(state, Action::SetIsPolicyAccepted(json!("false")));
    assert_eq!(effects, vec![Effect::Persist { key: POLICY_ACCEPTED_KEY, value: "false".into() }]);
    assert!(!state.is_policy_accepted);
}

#[test]
fn test_status_and_snackbar_coercion() {
    let (state, _) = dispatch(AppState::default(), Action::SetStatus(json!("42")));
    assert_eq!(state.status, StatusCode::Code(42));
    let (state, _) = dispatch(state, Action::SetStatus(json!("not-a-number")));
    assert_eq!(state.status, StatusCode::NotANumber);

    let (state, _) = dispatch(state, Action::snackbar_from_value(&json!({"message": 7, "isError": "TRUE"})));
    assert_eq!(state.snackbar, Snackbar { message: "7".into(), is_error: true });
}

#[test]
fn test_audit_selection_and_scan_update() {
    let audit = Audit { uuid: AuditId::from_str("au1"), scans: vec![scan("a"), scan("b")], ..Audit::default() };
    let (state, _) = dispatch(AppState::default(), Action::SetCurrentAudit(audit));
    let (state, _) = dispatch(state, Action::SetCurrentAuditUuid(AuditId::from_str("au1")));
    assert_eq!(state.current_audit_uuid.as_str(), "au1");

    let started = Scan {
        scheduled_at: Some("2024-01-01T00:00:00Z".into()),
        started_at: Some("2024-01-01T00:00:00Z".into()),
        ..scan("b")
    };
    let (state, _) = dispatch(state, Action::UpdateScan(started));
    assert_eq!(state.current_audit.scans[0], scan("a"));
    assert_eq!(state.current_audit.scans[1].uuid.as_str(), "b");
    assert_eq!(state.current_audit.scans[1].status(), ScanStatus::Scanning);
}

#[test]
fn test_current_scan_selection() {
    let s = Scan { ended_at: Some("2024-01-02T00:00:00".into()), ..scan("s1") };
    let (state, _) = dispatch(AppState::default(), Action::SetCurrentScan(s));
    let (state, _) = dispatch(state, Action::SetCurrentScanUuid(ScanId::from_str("s1")));
    assert_eq!(state.current_scan_uuid.as_str(), "s1");
    assert_eq!(state.current_scan_status(), ScanStatus::Completed);
}

#[test]
fn test_mutation_kinds_follow_actions() {
    let cases = vec![
        (Action::SetIsShownScanStatusDrawer(true), MutationKind::IsShownScanStatusDrawer),
        (Action::SetStatus(json!(1)), MutationKind::Status),
        (Action::ForgetToken, MutationKind::Token),
        (Action::UpdateScan(scan("x")), MutationKind::Scan),
    ];
    for (action, kind) in cases {
        assert_eq!(plan(action).mutation.kind(), kind);
    }
}
