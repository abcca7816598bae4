//! Command orchestration helpers from UI actions to backend command queue.

use admin_core::{ActionBridge, ActionCommand, BridgeError};
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), BridgeError> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "ui command queue is full");
            Err(BridgeError::QueueFull)
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::warn!(command = cmd_name, "backend command processor disconnected");
            Err(BridgeError::Disconnected)
        }
    }
}

/// [`ActionBridge`] over the bounded backend command queue.
#[derive(Clone)]
pub struct QueueBridge {
    cmd_tx: Sender<BackendCommand>,
}

impl QueueBridge {
    pub fn new(cmd_tx: Sender<BackendCommand>) -> Self {
        Self { cmd_tx }
    }

    pub fn send(&self, cmd: BackendCommand) -> Result<(), BridgeError> {
        dispatch_backend_command(&self.cmd_tx, cmd)
    }
}

impl ActionBridge for QueueBridge {
    fn dispatch(&self, cmd: ActionCommand) -> Result<(), BridgeError> {
        dispatch_backend_command(&self.cmd_tx, BackendCommand::Action(cmd))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use shared::domain::VersionId;

    #[test]
    fn wraps_actions_for_the_worker() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let bridge = QueueBridge::new(cmd_tx);

        bridge
            .edit_version(VersionId::new("2"), false)
            .expect("queued");

        match cmd_rx.try_recv().expect("command") {
            BackendCommand::Action(ActionCommand::EditVersion(req)) => {
                assert_eq!(req.id.as_str(), "2");
                assert!(!req.released);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn full_queue_maps_to_queue_full() {
        let (cmd_tx, _cmd_rx) = bounded(1);
        let bridge = QueueBridge::new(cmd_tx);
        bridge.send(BackendCommand::RefreshVersions).expect("first fits");
        assert_eq!(
            bridge.send(BackendCommand::RefreshVersions),
            Err(BridgeError::QueueFull)
        );
    }

    #[test]
    fn dropped_worker_maps_to_disconnected() {
        let (cmd_tx, cmd_rx) = bounded(1);
        drop(cmd_rx);
        let bridge = QueueBridge::new(cmd_tx);
        assert_eq!(
            bridge.create_version("/users/alice/collections/MAL/"),
            Err(BridgeError::Disconnected)
        );
    }
}
