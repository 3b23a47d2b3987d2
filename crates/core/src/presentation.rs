//! State-driven visibility rules for the card presentation.
//!
//! The renderer itself (markup, animation) lives in the embedding shell;
//! this module only decides what is visible given the current session
//! state and whether the record carries an image.

use serde::Serialize;

use crate::session::{CardSession, EditingFocus, LetterState, RevealState};

/// Which presentation elements are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PresentationView {
    /// The sealed envelope, shown until an open begins.
    pub closed_letter: bool,
    /// The scroll container, mounted from the moment the open begins.
    pub scroll: bool,
    /// Whether the scroll's content is fully revealed.
    pub content_revealed: bool,
    /// The captioned image block inside the content area.
    pub image_block: bool,
}

/// Visibility for a viewing or preview presentation.
pub fn view(session: &CardSession, has_image: bool) -> PresentationView {
    let scroll = session.letter() != LetterState::Closed;
    PresentationView {
        closed_letter: !scroll,
        scroll,
        content_revealed: session.reveal() == RevealState::Unfurled,
        image_block: scroll && has_image,
    }
}

/// Visibility for the editor pane.
///
/// While previewing, the editor shows the real presentation. Otherwise a
/// content-section focus shows the unfurled scroll inline and anything
/// else the closed letter.
pub fn editor_view(session: &CardSession, has_image: bool) -> PresentationView {
    if session.is_previewing() {
        return view(session, has_image);
    }
    let content = session.focus() == EditingFocus::ContentSection;
    PresentationView {
        closed_letter: !content,
        scroll: content,
        content_revealed: content,
        image_block: content && has_image,
    }
}
