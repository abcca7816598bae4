//! Confirmation surface content for a pending release toggle.

use shared::domain::VersionId;

pub const CONFIRM_LABEL: &str = "Yes";
pub const CANCEL_LABEL: &str = "No";

/// A toggle the user asked for but has not confirmed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingToggle {
    pub target_id: VersionId,
    pub requested_released: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationDialog {
    target_id: VersionId,
    requested_released: bool,
}

impl ConfirmationDialog {
    pub fn target_id(&self) -> &VersionId {
        &self.target_id
    }

    pub fn requested_released(&self) -> bool {
        self.requested_released
    }

    pub fn target_state_label(&self) -> &'static str {
        if self.requested_released {
            "released"
        } else {
            "unreleased"
        }
    }

    pub fn message(&self) -> String {
        format!(
            "Are you sure to mark version {} as {}?",
            self.target_id,
            self.target_state_label()
        )
    }
}

impl From<&PendingToggle> for ConfirmationDialog {
    fn from(pending: &PendingToggle) -> Self {
        Self {
            target_id: pending.target_id.clone(),
            requested_released: pending.requested_released,
        }
    }
}
