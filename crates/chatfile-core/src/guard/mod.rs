//! Per-resource admission control for user-triggered attachment actions.
//!
//! Rapid repeated input (double clicks, a slow network hiding completion)
//! would otherwise start the same download several times. The guard tracks:
//! - which resource keys are currently in flight
//! - when each key was last admitted, for a cooldown window
//!
//! One [`ActionGuard`] is created per rendering session and shared through a
//! [`SharedGuard`] handle with every attachment in the view. The guard never
//! observes completion itself; callers release keys, normally through a
//! [`ReleaseScheduler`] after a fixed release window.

mod admission;
mod key;
mod release;
mod shared;
mod state;

pub use admission::{Admission, Rejection};
pub use key::ResourceKey;
pub use release::{DeferredReleaseScheduler, ReleaseHandle, ReleaseScheduler, TokioReleaseScheduler};
pub use shared::SharedGuard;
pub use state::ActionGuard;
