//! Per-session state: the letter/reveal machine, the session-owned audio
//! handle, and the pending image selection.
//!
//! A session is one in-memory instance of the machine, either authoring
//! (editor + preview) or viewing (read-only recipient experience). Nothing
//! here is ever persisted.

mod asset;
mod audio;
mod machine;

pub use asset::{PendingAsset, PreviewHandle};
pub use audio::{AudioError, AudioHandle, ThemeAudio};
pub use machine::{
    CardSession, EditingFocus, Generation, LetterState, PhaseEvent, RevealState, SessionMode,
    SessionSnapshot, SETTLE_DELAY,
};
