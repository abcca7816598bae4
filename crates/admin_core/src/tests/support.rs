use std::cell::RefCell;

use crate::bridge::{ActionBridge, ActionCommand, BridgeError};

/// Bridge double that records every dispatched command.
#[derive(Default)]
pub struct RecordingBridge {
    pub sent: RefCell<Vec<ActionCommand>>,
    pub fail_with: Option<BridgeError>,
}

impl RecordingBridge {
    pub fn failing(err: BridgeError) -> Self {
        Self {
            sent: RefCell::new(Vec::new()),
            fail_with: Some(err),
        }
    }

    pub fn sent(&self) -> Vec<ActionCommand> {
        self.sent.borrow().clone()
    }
}

impl ActionBridge for RecordingBridge {
    fn dispatch(&self, cmd: ActionCommand) -> Result<(), BridgeError> {
        if let Some(err) = self.fail_with {
            return Err(err);
        }
        self.sent.borrow_mut().push(cmd);
        Ok(())
    }
}
