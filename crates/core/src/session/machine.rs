//! The card session state machine.
//!
//! One instance per authoring or viewing session. The structural letter
//! state and the content reveal advance on explicit phase-completion
//! events delivered by the embedding shell when its animations finish,
//! not on wall-clock timers; rapid open/close toggles therefore cannot
//! race, and tests drive the machine without real time passing.
//!
//! Invariant: the reveal can only be unfurling/unfurled while the letter
//! is open; a close request collapses the reveal and pauses audio
//! immediately while the letter lags until its settle event, so the
//! closing animation is not visually abrupt.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::asset::PendingAsset;
use super::audio::AudioHandle;

/// How long the embedding shell waits before delivering the open/close
/// settle events; the canonical animation timing.
pub const SETTLE_DELAY: Duration = Duration::from_millis(1000);

// ---------------------------------------------------------------------------
// States
// ---------------------------------------------------------------------------

/// Structural state of the letter envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterState {
    Closed,
    Opening,
    Open,
}

/// State of the content reveal inside the open letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealState {
    Collapsed,
    Unfurling,
    Unfurled,
}

/// Which form section currently has attention (authoring only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditingFocus {
    RecipientSection,
    ContentSection,
    None,
}

/// Whether the session is editing a card or viewing a shared one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    Authoring,
    Viewing,
}

/// Animation-finished signals delivered by the embedding shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseEvent {
    OpenSettled,
    UnfurlSettled,
    CloseSettled,
}

/// Monotonic token identifying a session epoch.
///
/// Callers of asynchronous upload/persistence operations capture the
/// current generation before awaiting and discard the result if the token
/// no longer matches when it completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Generation(u64);

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One in-memory authoring or viewing session.
///
/// Owns the (at most one) audio handle and, for authoring sessions, the
/// pending image selection. Both are released by [`CardSession::teardown`].
pub struct CardSession {
    mode: SessionMode,
    letter: LetterState,
    reveal: RevealState,
    focus: EditingFocus,
    previewing: bool,
    closing: bool,
    audio: Option<Box<dyn AudioHandle>>,
    pending_asset: Option<PendingAsset>,
    generation: u64,
    torn_down: bool,
}

/// Serializable snapshot of the observable session state.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub mode: SessionMode,
    pub letter: LetterState,
    pub reveal: RevealState,
    pub focus: EditingFocus,
    pub previewing: bool,
    pub audio_playing: bool,
    pub generation: Generation,
}

impl CardSession {
    /// Start an authoring session. Attention begins on the recipient
    /// section.
    pub fn authoring(audio: Option<Box<dyn AudioHandle>>) -> Self {
        Self::new(SessionMode::Authoring, audio, EditingFocus::RecipientSection)
    }

    /// Start a read-only viewing session.
    pub fn viewing(audio: Option<Box<dyn AudioHandle>>) -> Self {
        Self::new(SessionMode::Viewing, audio, EditingFocus::None)
    }

    fn new(mode: SessionMode, audio: Option<Box<dyn AudioHandle>>, focus: EditingFocus) -> Self {
        Self {
            mode,
            letter: LetterState::Closed,
            reveal: RevealState::Collapsed,
            focus,
            previewing: false,
            closing: false,
            audio,
            pending_asset: None,
            generation: 0,
            torn_down: false,
        }
    }

    // -- Accessors ----------------------------------------------------------

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn letter(&self) -> LetterState {
        self.letter
    }

    pub fn reveal(&self) -> RevealState {
        self.reveal
    }

    pub fn focus(&self) -> EditingFocus {
        self.focus
    }

    pub fn is_previewing(&self) -> bool {
        self.previewing
    }

    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }

    pub fn audio_playing(&self) -> bool {
        self.audio.as_ref().is_some_and(|a| a.is_playing())
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn pending_asset(&self) -> Option<&PendingAsset> {
        self.pending_asset.as_ref()
    }

    pub fn pending_asset_mut(&mut self) -> Option<&mut PendingAsset> {
        self.pending_asset.as_mut()
    }

    /// Current epoch token for stale-result checks.
    pub fn generation(&self) -> Generation {
        Generation(self.generation)
    }

    /// Whether an async result tagged with `token` may still be applied.
    pub fn is_current(&self, token: Generation) -> bool {
        !self.torn_down && token.0 == self.generation
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            mode: self.mode,
            letter: self.letter,
            reveal: self.reveal,
            focus: self.focus,
            previewing: self.previewing,
            audio_playing: self.audio_playing(),
            generation: self.generation(),
        }
    }

    // -- Open / close -------------------------------------------------------

    /// Begin the open sequence: start the music from time zero and move the
    /// letter to `Opening`.
    ///
    /// No-op unless the letter is fully closed. No-op without an audio
    /// handle: opening without a loaded audio resource is a guard, not a
    /// crash. Playback failure is logged and the open proceeds.
    pub fn request_open(&mut self) -> bool {
        if self.torn_down || self.letter != LetterState::Closed {
            return false;
        }
        let Some(audio) = self.audio.as_mut() else {
            return false;
        };
        if let Err(err) = audio.play_from_start() {
            tracing::warn!(error = %err, "Audio play failed");
        }
        self.letter = LetterState::Opening;
        self.closing = false;
        if self.mode == SessionMode::Authoring {
            self.focus = EditingFocus::None;
        }
        true
    }

    /// Request the close sequence: the reveal collapses and audio pauses
    /// immediately; the letter returns to `Closed` on
    /// [`PhaseEvent::CloseSettled`].
    pub fn request_close(&mut self) -> bool {
        if self.torn_down || self.closing || self.letter == LetterState::Closed {
            return false;
        }
        self.reveal = RevealState::Collapsed;
        if let Some(audio) = self.audio.as_mut() {
            audio.pause();
        }
        self.closing = true;
        true
    }

    /// Deliver an animation-finished signal.
    ///
    /// Signals that no longer match the machine's state are discarded: an
    /// `OpenSettled` arriving after a close was requested must not
    /// resurrect the unfurl.
    pub fn phase_settled(&mut self, phase: PhaseEvent) -> bool {
        if self.torn_down {
            return false;
        }
        match phase {
            PhaseEvent::OpenSettled => {
                if self.closing || self.letter != LetterState::Opening {
                    return false;
                }
                self.letter = LetterState::Open;
                self.reveal = RevealState::Unfurling;
                true
            }
            PhaseEvent::UnfurlSettled => {
                if self.closing || self.reveal != RevealState::Unfurling {
                    return false;
                }
                self.reveal = RevealState::Unfurled;
                true
            }
            PhaseEvent::CloseSettled => {
                if !self.closing {
                    return false;
                }
                self.letter = LetterState::Closed;
                self.closing = false;
                true
            }
        }
    }

    // -- Authoring overlay --------------------------------------------------

    /// Track which form section has attention. Authoring only; suspended
    /// while previewing; never touches audio.
    pub fn set_focus(&mut self, focus: EditingFocus) -> bool {
        if self.torn_down || self.mode != SessionMode::Authoring || self.previewing {
            return false;
        }
        self.focus = focus;
        true
    }

    /// Toggle authoring preview.
    ///
    /// Entering preview suspends the editing focus. Leaving preview
    /// force-closes the letter, collapses the reveal, and pauses audio so
    /// nothing leaks back into the editor view.
    pub fn toggle_preview(&mut self) -> bool {
        if self.torn_down || self.mode != SessionMode::Authoring {
            return false;
        }
        if self.previewing {
            self.previewing = false;
            self.letter = LetterState::Closed;
            self.reveal = RevealState::Collapsed;
            self.closing = false;
            if let Some(audio) = self.audio.as_mut() {
                audio.pause();
            }
        } else {
            self.previewing = true;
            self.focus = EditingFocus::None;
        }
        true
    }

    /// Select a new image, revoking any previous preview resource first.
    /// Selecting moves attention to the content section.
    pub fn select_image(&mut self, asset: PendingAsset) -> bool {
        if self.torn_down || self.mode != SessionMode::Authoring {
            return false;
        }
        if let Some(mut previous) = self.pending_asset.take() {
            previous.revoke_preview();
        }
        self.pending_asset = Some(asset);
        if !self.previewing {
            self.focus = EditingFocus::ContentSection;
        }
        true
    }

    /// Drop the current selection and release its preview resource.
    pub fn clear_image(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        match self.pending_asset.take() {
            Some(mut asset) => {
                asset.revoke_preview();
                true
            }
            None => false,
        }
    }

    /// Reset after a successful create: release the pending selection,
    /// return attention to the recipient section, and invalidate any
    /// in-flight async results from before the publish.
    pub fn reset_after_publish(&mut self) {
        if self.torn_down {
            return;
        }
        if let Some(mut asset) = self.pending_asset.take() {
            asset.revoke_preview();
        }
        if self.mode == SessionMode::Authoring && !self.previewing {
            self.focus = EditingFocus::RecipientSection;
        }
        self.generation += 1;
    }

    // -- Teardown -----------------------------------------------------------

    /// Release session resources: pause and drop the audio handle, revoke
    /// any pending preview. Safe to call repeatedly; later calls are
    /// no-ops.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.generation += 1;
        if let Some(mut audio) = self.audio.take() {
            audio.pause();
        }
        if let Some(mut asset) = self.pending_asset.take() {
            asset.revoke_preview();
        }
    }
}

impl Drop for CardSession {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for CardSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardSession")
            .field("mode", &self.mode)
            .field("letter", &self.letter)
            .field("reveal", &self.reveal)
            .field("focus", &self.focus)
            .field("previewing", &self.previewing)
            .field("closing", &self.closing)
            .field("has_audio", &self.audio.is_some())
            .field("torn_down", &self.torn_down)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::super::asset::{PendingAsset, PreviewHandle};
    use super::super::audio::{AudioError, AudioHandle, ThemeAudio};
    use super::*;

    /// Test audio spy counting play/pause calls through shared counters.
    #[derive(Default)]
    struct Counters {
        plays: AtomicU32,
        pauses: AtomicU32,
    }

    struct SpyAudio {
        counters: Arc<Counters>,
        playing: bool,
        fail_play: bool,
    }

    impl SpyAudio {
        fn new(counters: Arc<Counters>) -> Self {
            Self {
                counters,
                playing: false,
                fail_play: false,
            }
        }

        fn failing(counters: Arc<Counters>) -> Self {
            Self {
                counters,
                playing: false,
                fail_play: true,
            }
        }
    }

    impl AudioHandle for SpyAudio {
        fn play_from_start(&mut self) -> Result<(), AudioError> {
            self.counters.plays.fetch_add(1, Ordering::SeqCst);
            if self.fail_play {
                return Err(AudioError("autoplay blocked".to_string()));
            }
            self.playing = true;
            Ok(())
        }

        fn pause(&mut self) {
            self.counters.pauses.fetch_add(1, Ordering::SeqCst);
            self.playing = false;
        }

        fn is_playing(&self) -> bool {
            self.playing
        }
    }

    struct CountingPreview(Arc<AtomicU32>);

    impl PreviewHandle for CountingPreview {
        fn revoke(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn viewing_with_spy() -> (CardSession, Arc<Counters>) {
        let counters = Arc::new(Counters::default());
        let session = CardSession::viewing(Some(Box::new(SpyAudio::new(Arc::clone(&counters)))));
        (session, counters)
    }

    fn authoring_with_spy() -> (CardSession, Arc<Counters>) {
        let counters = Arc::new(Counters::default());
        let session = CardSession::authoring(Some(Box::new(SpyAudio::new(Arc::clone(&counters)))));
        (session, counters)
    }

    // -- Initial state ------------------------------------------------------

    #[test]
    fn sessions_start_closed_and_collapsed() {
        let session = CardSession::viewing(Some(Box::new(ThemeAudio::new("/m.mov"))));
        assert_eq!(session.letter(), LetterState::Closed);
        assert_eq!(session.reveal(), RevealState::Collapsed);
        assert!(!session.is_previewing());
        assert!(!session.audio_playing());
    }

    #[test]
    fn authoring_starts_on_recipient_section() {
        let session = CardSession::authoring(None);
        assert_eq!(session.focus(), EditingFocus::RecipientSection);
    }

    // -- Open sequence ------------------------------------------------------

    #[test]
    fn open_plays_audio_and_settles_into_unfurled() {
        let (mut session, counters) = viewing_with_spy();

        assert!(session.request_open());
        assert_eq!(session.letter(), LetterState::Opening);
        assert_eq!(session.reveal(), RevealState::Collapsed);
        assert_eq!(counters.plays.load(Ordering::SeqCst), 1);
        assert!(session.audio_playing());

        assert!(session.phase_settled(PhaseEvent::OpenSettled));
        assert_eq!(session.letter(), LetterState::Open);
        assert_eq!(session.reveal(), RevealState::Unfurling);

        assert!(session.phase_settled(PhaseEvent::UnfurlSettled));
        assert_eq!(session.reveal(), RevealState::Unfurled);
    }

    #[test]
    fn open_without_audio_handle_is_a_noop() {
        let mut session = CardSession::viewing(None);
        assert!(!session.request_open());
        assert_eq!(session.letter(), LetterState::Closed);
    }

    #[test]
    fn open_proceeds_when_playback_fails() {
        let counters = Arc::new(Counters::default());
        let mut session =
            CardSession::viewing(Some(Box::new(SpyAudio::failing(Arc::clone(&counters)))));

        assert!(session.request_open());
        assert_eq!(session.letter(), LetterState::Opening);
        assert_eq!(counters.plays.load(Ordering::SeqCst), 1);
        assert!(!session.audio_playing());
    }

    #[test]
    fn reopen_while_open_is_a_noop() {
        let (mut session, counters) = viewing_with_spy();
        session.request_open();
        session.phase_settled(PhaseEvent::OpenSettled);

        assert!(!session.request_open());
        assert_eq!(counters.plays.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn open_clears_authoring_focus() {
        let (mut session, _) = authoring_with_spy();
        assert_eq!(session.focus(), EditingFocus::RecipientSection);
        session.request_open();
        assert_eq!(session.focus(), EditingFocus::None);
    }

    // -- Close sequence -----------------------------------------------------

    #[test]
    fn close_collapses_and_pauses_immediately_letter_lags() {
        let (mut session, counters) = viewing_with_spy();
        session.request_open();
        session.phase_settled(PhaseEvent::OpenSettled);
        session.phase_settled(PhaseEvent::UnfurlSettled);

        assert!(session.request_close());
        // Reveal and audio react immediately.
        assert_eq!(session.reveal(), RevealState::Collapsed);
        assert_eq!(counters.pauses.load(Ordering::SeqCst), 1);
        // The letter stays up until its settle event.
        assert_eq!(session.letter(), LetterState::Open);

        assert!(session.phase_settled(PhaseEvent::CloseSettled));
        assert_eq!(session.letter(), LetterState::Closed);
    }

    #[test]
    fn close_while_closed_is_a_noop() {
        let (mut session, counters) = viewing_with_spy();
        assert!(!session.request_close());
        assert_eq!(counters.pauses.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn double_close_request_pauses_once() {
        let (mut session, counters) = viewing_with_spy();
        session.request_open();
        session.phase_settled(PhaseEvent::OpenSettled);

        assert!(session.request_close());
        assert!(!session.request_close());
        assert_eq!(counters.pauses.load(Ordering::SeqCst), 1);
    }

    /// Open then immediate close before the open settles must converge to
    /// Closed/Collapsed; the late settle events are stale and discarded.
    #[test]
    fn close_before_open_settles_never_sticks_unfurling() {
        let (mut session, _) = viewing_with_spy();
        session.request_open();
        assert!(session.request_close());

        // The stale open-settle arrives after the close was requested.
        assert!(!session.phase_settled(PhaseEvent::OpenSettled));
        assert_eq!(session.reveal(), RevealState::Collapsed);

        assert!(session.phase_settled(PhaseEvent::CloseSettled));
        assert_eq!(session.letter(), LetterState::Closed);
        assert_eq!(session.reveal(), RevealState::Collapsed);
    }

    #[test]
    fn stale_unfurl_settle_after_close_is_discarded() {
        let (mut session, _) = viewing_with_spy();
        session.request_open();
        session.phase_settled(PhaseEvent::OpenSettled);
        // Close lands while the unfurl animation is still running.
        session.request_close();

        assert!(!session.phase_settled(PhaseEvent::UnfurlSettled));
        assert_eq!(session.reveal(), RevealState::Collapsed);

        session.phase_settled(PhaseEvent::CloseSettled);
        assert_eq!(session.letter(), LetterState::Closed);
    }

    #[test]
    fn reopen_after_full_close_restarts_audio() {
        let (mut session, counters) = viewing_with_spy();
        session.request_open();
        session.phase_settled(PhaseEvent::OpenSettled);
        session.request_close();
        session.phase_settled(PhaseEvent::CloseSettled);

        assert!(session.request_open());
        assert_eq!(counters.plays.load(Ordering::SeqCst), 2);
        assert_eq!(session.letter(), LetterState::Opening);
    }

    #[test]
    fn settle_events_without_transition_are_discarded() {
        let (mut session, _) = viewing_with_spy();
        assert!(!session.phase_settled(PhaseEvent::OpenSettled));
        assert!(!session.phase_settled(PhaseEvent::UnfurlSettled));
        assert!(!session.phase_settled(PhaseEvent::CloseSettled));
        assert_eq!(session.letter(), LetterState::Closed);
        assert_eq!(session.reveal(), RevealState::Collapsed);
    }

    // -- Focus and preview --------------------------------------------------

    #[test]
    fn focus_changes_do_not_touch_audio() {
        let (mut session, counters) = authoring_with_spy();
        assert!(session.set_focus(EditingFocus::ContentSection));
        assert!(session.set_focus(EditingFocus::None));
        assert_eq!(counters.plays.load(Ordering::SeqCst), 0);
        assert_eq!(counters.pauses.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn focus_is_rejected_for_viewing_sessions() {
        let (mut session, _) = viewing_with_spy();
        assert!(!session.set_focus(EditingFocus::ContentSection));
    }

    #[test]
    fn entering_preview_suspends_focus() {
        let (mut session, _) = authoring_with_spy();
        session.set_focus(EditingFocus::ContentSection);

        assert!(session.toggle_preview());
        assert!(session.is_previewing());
        assert_eq!(session.focus(), EditingFocus::None);

        // Focus changes are suspended while previewing.
        assert!(!session.set_focus(EditingFocus::RecipientSection));
        assert_eq!(session.focus(), EditingFocus::None);
    }

    #[test]
    fn leaving_preview_never_leaks_open_letter_or_audio() {
        let (mut session, counters) = authoring_with_spy();
        session.toggle_preview();
        session.request_open();
        session.phase_settled(PhaseEvent::OpenSettled);
        session.phase_settled(PhaseEvent::UnfurlSettled);
        assert!(session.audio_playing());

        assert!(session.toggle_preview());
        assert!(!session.is_previewing());
        assert_eq!(session.letter(), LetterState::Closed);
        assert_eq!(session.reveal(), RevealState::Collapsed);
        assert!(!session.audio_playing());
        assert_eq!(counters.pauses.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn leaving_preview_mid_close_cancels_the_pending_settle() {
        let (mut session, _) = authoring_with_spy();
        session.toggle_preview();
        session.request_open();
        session.phase_settled(PhaseEvent::OpenSettled);
        session.request_close();

        // Back to the editor before the close settles.
        session.toggle_preview();
        assert_eq!(session.letter(), LetterState::Closed);

        // The stale close-settle has nothing left to do.
        assert!(!session.phase_settled(PhaseEvent::CloseSettled));
    }

    #[test]
    fn preview_toggle_is_rejected_for_viewing_sessions() {
        let (mut session, _) = viewing_with_spy();
        assert!(!session.toggle_preview());
    }

    // -- Pending asset ------------------------------------------------------

    #[test]
    fn selecting_an_image_replaces_and_revokes_the_previous_preview() {
        let (mut session, _) = authoring_with_spy();
        let revocations = Arc::new(AtomicU32::new(0));

        let first = PendingAsset::new(
            "first.png",
            Some(Box::new(CountingPreview(Arc::clone(&revocations)))),
        );
        assert!(session.select_image(first));
        assert_eq!(session.focus(), EditingFocus::ContentSection);

        let second = PendingAsset::new("second.jpg", None);
        assert!(session.select_image(second));
        assert_eq!(revocations.load(Ordering::SeqCst), 1);
        assert_eq!(session.pending_asset().unwrap().file_name(), "second.jpg");
    }

    #[test]
    fn clear_image_revokes_and_empties_the_selection() {
        let (mut session, _) = authoring_with_spy();
        let revocations = Arc::new(AtomicU32::new(0));
        session.select_image(PendingAsset::new(
            "photo.png",
            Some(Box::new(CountingPreview(Arc::clone(&revocations)))),
        ));

        assert!(session.clear_image());
        assert_eq!(revocations.load(Ordering::SeqCst), 1);
        assert!(session.pending_asset().is_none());

        // Clearing again is a no-op.
        assert!(!session.clear_image());
        assert_eq!(revocations.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn select_image_is_rejected_for_viewing_sessions() {
        let (mut session, _) = viewing_with_spy();
        assert!(!session.select_image(PendingAsset::new("a.png", None)));
    }

    // -- Publish reset and generations --------------------------------------

    #[test]
    fn reset_after_publish_releases_asset_and_restores_focus() {
        let (mut session, _) = authoring_with_spy();
        let revocations = Arc::new(AtomicU32::new(0));
        session.select_image(PendingAsset::new(
            "photo.png",
            Some(Box::new(CountingPreview(Arc::clone(&revocations)))),
        ));

        let before = session.generation();
        session.reset_after_publish();

        assert_eq!(revocations.load(Ordering::SeqCst), 1);
        assert!(session.pending_asset().is_none());
        assert_eq!(session.focus(), EditingFocus::RecipientSection);
        assert!(!session.is_current(before));
    }

    #[test]
    fn stale_generation_tokens_are_rejected() {
        let (mut session, _) = authoring_with_spy();
        let token = session.generation();
        assert!(session.is_current(token));

        session.reset_after_publish();
        assert!(!session.is_current(token));
        assert!(session.is_current(session.generation()));
    }

    #[test]
    fn no_token_is_current_after_teardown() {
        let (mut session, _) = viewing_with_spy();
        let token = session.generation();
        session.teardown();
        assert!(!session.is_current(token));
        assert!(!session.is_current(session.generation()));
    }

    // -- Teardown -----------------------------------------------------------

    #[test]
    fn teardown_pauses_and_clears_audio_exactly_once() {
        let (mut session, counters) = viewing_with_spy();
        session.request_open();

        session.teardown();
        assert!(session.is_torn_down());
        assert!(!session.has_audio());
        assert_eq!(counters.pauses.load(Ordering::SeqCst), 1);

        // Repeated teardown is a no-op.
        session.teardown();
        session.teardown();
        assert_eq!(counters.pauses.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn teardown_revokes_pending_preview() {
        let (mut session, _) = authoring_with_spy();
        let revocations = Arc::new(AtomicU32::new(0));
        session.select_image(PendingAsset::new(
            "photo.png",
            Some(Box::new(CountingPreview(Arc::clone(&revocations)))),
        ));

        session.teardown();
        assert_eq!(revocations.load(Ordering::SeqCst), 1);
        assert!(session.pending_asset().is_none());
    }

    #[test]
    fn drop_tears_down_once() {
        let counters = Arc::new(Counters::default());
        {
            let mut session =
                CardSession::viewing(Some(Box::new(SpyAudio::new(Arc::clone(&counters)))));
            session.request_open();
            session.teardown();
        }
        // Drop after an explicit teardown must not pause again.
        assert_eq!(counters.pauses.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn transitions_are_rejected_after_teardown() {
        let (mut session, _) = viewing_with_spy();
        session.teardown();

        assert!(!session.request_open());
        assert!(!session.request_close());
        assert!(!session.phase_settled(PhaseEvent::OpenSettled));
        assert_eq!(session.letter(), LetterState::Closed);
    }
}
