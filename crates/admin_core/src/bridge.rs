//! Fire-and-forget dispatch into the external async pipeline.
//!
//! A bridge only queues commands. Results come back later as refreshed
//! snapshots (version lists, creation progress), never as return values.

use shared::{
    domain::VersionId,
    protocol::{EditVersionRequest, NewDictionary},
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreationKind {
    Version,
    Dictionary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionCommand {
    EditVersion(EditVersionRequest),
    CreateVersion { dictionary_url: String },
    CreateDictionary(NewDictionary),
    ResetCreation(CreationKind),
}

impl ActionCommand {
    pub fn name(&self) -> &'static str {
        match self {
            ActionCommand::EditVersion(_) => "edit_version",
            ActionCommand::CreateVersion { .. } => "create_version",
            ActionCommand::CreateDictionary(_) => "create_dictionary",
            ActionCommand::ResetCreation(_) => "reset_creation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("action queue is full; please retry")]
    QueueFull,
    #[error("action processor disconnected")]
    Disconnected,
}

pub trait ActionBridge {
    fn dispatch(&self, cmd: ActionCommand) -> Result<(), BridgeError>;

    fn edit_version(&self, id: VersionId, released: bool) -> Result<(), BridgeError> {
        self.dispatch(ActionCommand::EditVersion(EditVersionRequest::new(
            id, released,
        )))
    }

    fn create_version(&self, dictionary_url: impl Into<String>) -> Result<(), BridgeError>
    where
        Self: Sized,
    {
        self.dispatch(ActionCommand::CreateVersion {
            dictionary_url: dictionary_url.into(),
        })
    }
}

impl<B: ActionBridge + ?Sized> ActionBridge for &B {
    fn dispatch(&self, cmd: ActionCommand) -> Result<(), BridgeError> {
        (**self).dispatch(cmd)
    }
}
