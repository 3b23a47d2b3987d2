//! In-memory viewing sessions.
//!
//! Each recipient viewing a card gets one [`CardSession`] driving the
//! reveal sequence. Sessions live until the viewer deletes them or the
//! background sweeper evicts them after the configured idle period, so
//! abandoned tabs do not leak audio handles.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use lantern_core::session::{CardSession, SessionSnapshot, ThemeAudio};
use lantern_core::theme::CardStyle;
use lantern_core::types::CardId;
use lantern_db::models::card::CardRecord;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// How often the sweeper looks for idle sessions.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

struct SessionEntry {
    card_id: CardId,
    session: CardSession,
    last_touched: Instant,
}

/// Owner of all live viewing sessions.
pub struct SessionManager {
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
    idle_ttl: Duration,
}

impl SessionManager {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_ttl,
        }
    }

    /// Start a viewing session for a fetched card.
    ///
    /// The session owns its audio handle, created here from the card's
    /// resolved theme; handles are never shared between sessions.
    pub async fn create_for_card(&self, card: &CardRecord) -> (Uuid, SessionSnapshot) {
        let style = CardStyle::resolve_or_default(&card.style);
        let audio = ThemeAudio::new(style.music_url());
        let session = CardSession::viewing(Some(Box::new(audio)));

        let id = Uuid::now_v7();
        let snapshot = session.snapshot();
        self.sessions.write().await.insert(
            id,
            SessionEntry {
                card_id: card.id,
                session,
                last_touched: Instant::now(),
            },
        );
        tracing::debug!(session_id = %id, card_id = %card.id, "Viewing session started");
        (id, snapshot)
    }

    /// Apply a transition to a session, returning the resulting snapshot.
    ///
    /// Returns `None` for unknown session ids. Transitions the machine
    /// rejects are no-ops; the snapshot reflects the unchanged state.
    pub async fn apply(
        &self,
        id: Uuid,
        transition: impl FnOnce(&mut CardSession) -> bool,
    ) -> Option<SessionSnapshot> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id)?;
        entry.last_touched = Instant::now();
        transition(&mut entry.session);
        Some(entry.session.snapshot())
    }

    /// Current state snapshot, or `None` for unknown ids.
    pub async fn snapshot(&self, id: Uuid) -> Option<SessionSnapshot> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id)?;
        entry.last_touched = Instant::now();
        Some(entry.session.snapshot())
    }

    /// The card a session is viewing, or `None` for unknown ids.
    pub async fn card_id(&self, id: Uuid) -> Option<CardId> {
        self.sessions.read().await.get(&id).map(|e| e.card_id)
    }

    /// Tear a session down and remove it. Returns `false` for unknown ids.
    pub async fn teardown(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id);
        match removed {
            Some(mut entry) => {
                entry.session.teardown();
                tracing::debug!(session_id = %id, "Viewing session torn down");
                true
            }
            None => false,
        }
    }

    /// Tear down every remaining session (shutdown path).
    pub async fn teardown_all(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let count = sessions.len();
        for (_, mut entry) in sessions.drain() {
            entry.session.teardown();
        }
        count
    }

    /// Evict sessions idle past the TTL, tearing each down first.
    pub async fn sweep_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let now = Instant::now();
        let idle: Vec<Uuid> = sessions
            .iter()
            .filter(|(_, entry)| now.duration_since(entry.last_touched) >= self.idle_ttl)
            .map(|(id, _)| *id)
            .collect();

        for id in &idle {
            if let Some(mut entry) = sessions.remove(id) {
                entry.session.teardown();
            }
        }
        if !idle.is_empty() {
            tracing::info!(count = idle.len(), "Swept idle viewing sessions");
        }
        idle.len()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Run the idle-session sweeper until cancelled.
pub async fn run_sweeper(manager: std::sync::Arc<SessionManager>, cancel: CancellationToken) {
    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            () = tokio::time::sleep(SWEEP_INTERVAL) => {
                manager.sweep_idle().await;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
