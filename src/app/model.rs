// Defines the core data structures for the application.

/// Snapshot of the watched service/program pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairStatus {
    pub service_running: bool,
    pub program_running: bool,
}

impl PairStatus {
    /// The pair counts as running when either half is up.
    pub fn any_running(&self) -> bool {
        self.service_running || self.program_running
    }
}

/// What the toggle will do given the current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Start,
    Stop,
}

impl ToggleAction {
    pub fn for_status(status: PairStatus) -> Self {
        if status.any_running() {
            ToggleAction::Stop
        } else {
            ToggleAction::Start
        }
    }
}
