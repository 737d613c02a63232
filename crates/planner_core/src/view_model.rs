/// Status line shown next to the plan region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncStatus {
    #[default]
    Idle,
    Loading,
    /// Loading, and newer edits are waiting for the next request.
    LoadingWithPending,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub targets: String,
    pub recipes: String,
    pub externals: String,
    /// Last plan fragment received; `None` until the first response.
    pub plan_markup: Option<String>,
    pub status: SyncStatus,
    /// Reason of the most recent failed fetch, cleared by the next success.
    pub last_failure: Option<String>,
    pub dirty: bool,
}
