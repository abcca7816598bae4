//! Progress of a single creation request as seen by the UI.

use shared::{
    domain::{DictionaryRecord, VersionRecord},
    error::ApiError,
};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttemptId(pub Uuid);

impl AttemptId {
    fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Anything a successful creation can navigate to.
pub trait Addressable {
    fn url(&self) -> &str;
}

impl Addressable for DictionaryRecord {
    fn url(&self) -> &str {
        &self.url
    }
}

impl Addressable for VersionRecord {
    fn url(&self) -> &str {
        &self.url
    }
}

/// `result` is written at most once per attempt, and `begin` clears it
/// before raising `loading`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreationProgress<T> {
    loading: bool,
    error: Option<ApiError>,
    result: Option<T>,
    attempt: Option<AttemptId>,
}

impl<T> Default for CreationProgress<T> {
    fn default() -> Self {
        Self {
            loading: false,
            error: None,
            result: None,
            attempt: None,
        }
    }
}

impl<T> CreationProgress<T> {
    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    pub fn attempt(&self) -> Option<AttemptId> {
        self.attempt
    }

    pub fn begin(&mut self) -> AttemptId {
        self.result = None;
        self.error = None;
        let attempt = AttemptId::fresh();
        self.attempt = Some(attempt);
        self.loading = true;
        attempt
    }

    /// Returns `false` when the completion does not belong to the attempt in
    /// flight and was dropped.
    pub fn succeed(&mut self, attempt: AttemptId, value: T) -> bool {
        if !self.accepts(attempt) || self.result.is_some() {
            tracing::warn!(?attempt, "dropping stale creation success");
            return false;
        }
        self.result = Some(value);
        self.loading = false;
        true
    }

    pub fn fail(&mut self, attempt: AttemptId, error: ApiError) -> bool {
        if !self.accepts(attempt) {
            tracing::warn!(?attempt, "dropping stale creation failure");
            return false;
        }
        self.error = Some(error);
        self.loading = false;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn accepts(&self, attempt: AttemptId) -> bool {
        self.loading && self.attempt == Some(attempt)
    }
}

#[cfg(test)]
#[path = "tests/creation_tests.rs"]
mod tests;
