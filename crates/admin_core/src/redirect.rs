//! One-shot navigation after a creation request finishes successfully.

use tracing::{debug, info};

use crate::{
    bridge::{ActionBridge, ActionCommand, BridgeError, CreationKind},
    creation::{Addressable, AttemptId, CreationProgress},
};

/// Previous `loading` value, for detecting the loading -> idle edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitionMemory {
    was_loading: bool,
}

impl TransitionMemory {
    /// Returns whether this observation is the loading -> idle edge, then
    /// remembers `loading` for the next call.
    pub fn step(&mut self, loading: bool) -> bool {
        let just_finished = self.was_loading && !loading;
        self.was_loading = loading;
        just_finished
    }

    pub fn was_loading(&self) -> bool {
        self.was_loading
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub to: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Dispatched,
    InFlight,
    AlreadyFired,
}

#[derive(Debug)]
pub struct CreateAndRedirectController {
    kind: CreationKind,
    memory: TransitionMemory,
    awaiting: bool,
    /// Attempt seen in flight while nothing was submitted from here.
    foreign: Option<AttemptId>,
    fired: bool,
}

impl CreateAndRedirectController {
    /// Starts a controller lifetime. Progress left over from an earlier visit
    /// is cleared here, before any observation.
    pub fn mount(bridge: &impl ActionBridge, kind: CreationKind) -> Result<Self, BridgeError> {
        bridge.dispatch(ActionCommand::ResetCreation(kind))?;
        debug!(?kind, "creation controller mounted");
        Ok(Self {
            kind,
            memory: TransitionMemory::default(),
            awaiting: false,
            foreign: None,
            fired: false,
        })
    }

    pub fn kind(&self) -> CreationKind {
        self.kind
    }

    pub fn submit(
        &mut self,
        bridge: &impl ActionBridge,
        cmd: ActionCommand,
    ) -> Result<SubmitOutcome, BridgeError> {
        if self.fired {
            return Ok(SubmitOutcome::AlreadyFired);
        }
        if self.awaiting || self.memory.was_loading() {
            return Ok(SubmitOutcome::InFlight);
        }
        bridge.dispatch(cmd)?;
        self.awaiting = true;
        Ok(SubmitOutcome::Dispatched)
    }

    /// Feeds one progress snapshot. Yields a navigation exactly once, on the
    /// observation where loading clears and a result is present, and only
    /// for an attempt submitted through this controller.
    pub fn observe<T: Addressable>(&mut self, progress: &CreationProgress<T>) -> Option<Navigation> {
        if progress.loading() && !self.awaiting {
            self.foreign = progress.attempt();
        }
        if !self.memory.step(progress.loading()) {
            return None;
        }
        if progress.attempt().is_some() && progress.attempt() == self.foreign {
            debug!(kind = ?self.kind, "ignoring completion of an attempt not submitted here");
            return None;
        }
        if !self.awaiting {
            return None;
        }
        self.awaiting = false;
        if self.fired {
            return None;
        }
        let created = progress.result()?;

        self.fired = true;
        info!(kind = ?self.kind, to = created.url(), "creation finished; navigating");
        Some(Navigation {
            to: created.url().to_string(),
        })
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Rearms the controller for a new attempt in the same lifetime.
    pub fn reset(&mut self) {
        self.memory = TransitionMemory::default();
        self.awaiting = false;
        self.foreign = None;
        self.fired = false;
    }

    pub fn dispose(self) {
        debug!(kind = ?self.kind, fired = self.fired, "creation controller disposed");
    }
}

#[cfg(test)]
#[path = "tests/redirect_tests.rs"]
mod tests;
