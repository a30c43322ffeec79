//! Admission decisions.

/// Why an action was not admitted. Both cases are expected user repetition, not faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The same key was admitted and has not been released yet.
    #[error("action already in flight")]
    AlreadyInFlight,
    /// The key was admitted less than one cooldown window ago.
    #[error("cooldown window still active")]
    CooldownActive,
}

/// Result of [`super::ActionGuard::try_admit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    Rejected(Rejection),
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted)
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Admission::Admitted => None,
            Admission::Rejected(r) => Some(*r),
        }
    }
}
