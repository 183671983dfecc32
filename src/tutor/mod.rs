mod dwell;
mod policy;
mod session;
mod snapshot;

pub use dwell::{Dwell, DwellKind, DwellTimer};
pub use policy::{Flow, ResetScope, SessionPolicy};
pub use session::{KeyResponse, Session};
pub use snapshot::Snapshot;

/// What just happened to the current item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Waiting,
    Success,
    Error,
}
