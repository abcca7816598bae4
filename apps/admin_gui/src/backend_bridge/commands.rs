//! Backend commands queued from UI to backend worker.

use admin_core::ActionCommand;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    LoadSession,
    OpenDictionary { dictionary_url: String },
    RefreshVersions,
    Action(ActionCommand),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::LoadSession => "load_session",
            BackendCommand::OpenDictionary { .. } => "open_dictionary",
            BackendCommand::RefreshVersions => "refresh_versions",
            BackendCommand::Action(action) => action.name(),
        }
    }
}
