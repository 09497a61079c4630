use crate::{http::HttpClientHandle, ids::*, model::*};

/// A single, already-normalised state assignment.
#[derive(Clone, Debug)]
pub enum Mutation {
    SetCurrentAudit(Audit),
    SetCurrentAuditUuid(AuditId),
    SetCurrentScan(Scan),
    SetCurrentScanUuid(ScanId),
    SetIsPolicyAccepted(bool),
    SetIsShownScanStatusDrawer(bool),
    SetStatus(StatusCode),
    SetSnackbar(Snackbar),
    SetHttpClient(HttpClientHandle),
    SetToken(Option<String>),
    UpdateScan(Scan),
}

/// Which field a mutation touched; handed to subscribers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MutationKind {
    CurrentAudit,
    CurrentAuditUuid,
    CurrentScan,
    CurrentScanUuid,
    IsPolicyAccepted,
    IsShownScanStatusDrawer,
    Status,
    Snackbar,
    HttpClient,
    Token,
    Scan,
}

impl Mutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::SetCurrentAudit(_) => MutationKind::CurrentAudit,
            Mutation::SetCurrentAuditUuid(_) => MutationKind::CurrentAuditUuid,
            Mutation::SetCurrentScan(_) => MutationKind::CurrentScan,
            Mutation::SetCurrentScanUuid(_) => MutationKind::CurrentScanUuid,
            Mutation::SetIsPolicyAccepted(_) => MutationKind::IsPolicyAccepted,
            Mutation::SetIsShownScanStatusDrawer(_) => MutationKind::IsShownScanStatusDrawer,
            Mutation::SetStatus(_) => MutationKind::Status,
            Mutation::SetSnackbar(_) => MutationKind::Snackbar,
            Mutation::SetHttpClient(_) => MutationKind::HttpClient,
            Mutation::SetToken(_) => MutationKind::Token,
            Mutation::UpdateScan(_) => MutationKind::Scan,
        }
    }
}

/// Result of reducing one mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Commit {
    pub kind: MutationKind,
    /// False when the mutation had nothing to apply to (an `UpdateScan` for
    /// a scan that is not in the current audit).
    pub changed: bool,
}
