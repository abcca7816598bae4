//! Capability value gating release toggles and version creation.

use shared::domain::{OrgMembership, Profile};

/// Hover/focus text for an inert release toggle.
pub const PERMISSION_DENIED_HINT: &str = "You don’t have permission to change the status";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionGate {
    can_toggle: bool,
}

impl PermissionGate {
    pub fn new(can_toggle: bool) -> Self {
        Self { can_toggle }
    }

    pub fn granted() -> Self {
        Self::new(true)
    }

    pub fn denied() -> Self {
        Self::new(false)
    }

    /// A user may modify a dictionary owned by themselves or by one of their
    /// organisations. Owner URLs are compared ignoring a trailing slash.
    pub fn for_owner(profile: Option<&Profile>, orgs: &[OrgMembership], owner_url: &str) -> Self {
        let owner = normalize_url(owner_url);
        if owner.is_empty() {
            return Self::denied();
        }
        let owns = profile.is_some_and(|p| normalize_url(&p.url) == owner)
            || orgs.iter().any(|org| normalize_url(&org.url) == owner);
        Self::new(owns)
    }

    pub fn can_toggle(&self) -> bool {
        self.can_toggle
    }

    /// Explanation to expose on a denied control, if any.
    pub fn denial_hint(&self) -> Option<&'static str> {
        (!self.can_toggle).then_some(PERMISSION_DENIED_HINT)
    }
}

impl Default for PermissionGate {
    fn default() -> Self {
        Self::denied()
    }
}

fn normalize_url(url: &str) -> &str {
    url.trim().trim_end_matches('/')
}
