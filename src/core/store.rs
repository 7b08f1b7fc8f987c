//! The idea store - the single owner of ideas, the local vote set and the theme flag.
//!
//! Every mutation is applied to memory first, so readers see it immediately,
//! and then mirrored to the durable store by a spawned task. Each task writes
//! the snapshot taken at the moment of the mutation; when two writes of the
//! same key race, whichever completes last wins. Write failures are logged
//! and counted, never returned to the caller of the mutation.
//!
//! Mutations spawn Tokio tasks and must run inside a Tokio runtime. Dropping
//! the store detaches writes still in flight rather than aborting them; call
//! [`IdeaStore::flush`] to wait for them.

use crate::core::evaluation::Evaluator;
use crate::core::ids::IdGenerator;
use crate::core::ranking::{self, IdeaStats, LeaderboardKind, RankedIdea, SortOrder};
use crate::core::theme::{Palette, palette_for};
use crate::errors::{Error, Result};
use crate::models::{Idea, IdeaId, NewIdea};
use crate::storage::{DurableStore, IDEAS_KEY, THEME_KEY, VOTES_KEY};
use chrono::Utc;
use rand::{Rng, rngs::StdRng};
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinSet;
use tracing::{debug, error, info, instrument, warn};

const EVENT_CAPACITY: usize = 64;

/// Construction-time knobs for an [`IdeaStore`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Platform light/dark preference, used when no theme was ever persisted.
    /// `None` means light.
    pub system_prefers_dark: Option<bool>,
    /// Refuse votes for ids that match no idea. Off by default, in which case
    /// such a vote is still recorded in the vote set.
    pub strict_votes: bool,
}

/// Notification sent to subscribers after every state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// Durable state has been loaded
    Hydrated,
    /// A new idea was added at the front of the list
    IdeaSubmitted(IdeaId),
    /// The local user voted for this id
    VoteRecorded(IdeaId),
    /// Dark mode is now on (`true`) or off
    ThemeChanged(bool),
}

/// Result of [`IdeaStore::vote_for_idea`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The vote was counted; `votes` is the idea's new total
    Counted {
        /// Updated vote count
        votes: u32,
    },
    /// No idea has this id, but the id was added to the vote set anyway
    RecordedWithoutIdea,
    /// This device already voted for the idea; nothing changed
    AlreadyVoted,
    /// Strict mode only: no idea has this id and nothing changed
    UnknownIdea,
}

/// How one durable key fared during hydration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyLoad {
    /// Present and parsed
    Loaded,
    /// Never written; default used
    Missing,
    /// Read or parse failed; default used
    FellBack,
}

/// Per-key outcome of [`IdeaStore::hydrate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HydrationReport {
    /// The idea list
    pub ideas: KeyLoad,
    /// The local vote set
    pub votes: KeyLoad,
    /// The dark mode flag
    pub theme: KeyLoad,
}

/// In-memory application state with write-through persistence.
pub struct IdeaStore<R = StdRng> {
    durable: Arc<dyn DurableStore>,
    evaluator: Evaluator<R>,
    ids: IdGenerator,
    options: StoreOptions,
    ideas: Vec<Idea>,
    user_votes: BTreeSet<IdeaId>,
    dark_mode: bool,
    ready: bool,
    pending: JoinSet<usize>,
    failed_writes: usize,
    events: broadcast::Sender<StoreEvent>,
}

impl<R: Rng> IdeaStore<R> {
    /// Creates an empty, not-yet-ready store. Call [`Self::hydrate`] once before
    /// showing anything that depends on ideas.
    pub fn new(durable: Arc<dyn DurableStore>, evaluator: Evaluator<R>, options: StoreOptions) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            durable,
            evaluator,
            ids: IdGenerator::new(),
            options,
            ideas: Vec::new(),
            user_votes: BTreeSet::new(),
            dark_mode: options.system_prefers_dark.unwrap_or(false),
            ready: false,
            pending: JoinSet::new(),
            failed_writes: 0,
            events,
        }
    }

    /// Loads ideas, votes and theme from the durable store, all three
    /// concurrently. A key that is missing or unreadable falls back to its
    /// default without affecting the others. Marks the store ready.
    ///
    /// # Errors
    /// Returns `Error::AlreadyHydrated` on any call after the first; state is
    /// left untouched.
    #[instrument(skip(self))]
    pub async fn hydrate(&mut self) -> Result<HydrationReport> {
        if self.ready {
            warn!("Ignoring repeated hydrate call");
            return Err(Error::AlreadyHydrated);
        }

        let durable = Arc::clone(&self.durable);
        let (ideas, votes, theme) = tokio::join!(
            load_key::<Vec<Idea>>(durable.as_ref(), IDEAS_KEY),
            load_key::<BTreeSet<IdeaId>>(durable.as_ref(), VOTES_KEY),
            load_key::<bool>(durable.as_ref(), THEME_KEY),
        );

        let report = HydrationReport {
            ideas: ideas.1,
            votes: votes.1,
            theme: theme.1,
        };

        self.ideas = ideas.0.unwrap_or_default();
        self.user_votes = votes.0.unwrap_or_default();
        self.dark_mode = theme
            .0
            .unwrap_or_else(|| self.options.system_prefers_dark.unwrap_or(false));

        for idea in &self.ideas {
            self.ids.observe(&idea.id);
        }

        self.ready = true;
        info!(
            "Hydrated {} ideas, {} votes, dark mode {}",
            self.ideas.len(),
            self.user_votes.len(),
            self.dark_mode
        );
        self.notify(StoreEvent::Hydrated);
        Ok(report)
    }

    /// Adds a new idea at the front of the list with a fresh rating and
    /// feedback, then persists the idea list in the background.
    ///
    /// Fields are stored as given; callers trim and validate beforehand
    /// (see [`NewIdea::validated`]).
    pub fn submit_idea(&mut self, new_idea: NewIdea) -> &Idea {
        let evaluation = self.evaluator.evaluate(&new_idea);
        let now = Utc::now();
        let idea = Idea {
            id: self.ids.next_id(now),
            name: new_idea.name,
            tagline: new_idea.tagline,
            description: new_idea.description,
            rating: evaluation.rating,
            feedback: evaluation.feedback.to_string(),
            votes: 0,
            created_at: now,
        };
        let id = idea.id.clone();
        info!("Submitted idea {} with rating {}", id, idea.rating);

        self.ideas.insert(0, idea);
        if let Some(ideas) = encode(IDEAS_KEY, &self.ideas) {
            self.spawn_writes(vec![(IDEAS_KEY, ideas)]);
        }
        self.notify(StoreEvent::IdeaSubmitted(id));

        &self.ideas[0]
    }

    /// Casts the local user's single vote for `idea_id`.
    ///
    /// A repeat vote changes nothing. Otherwise the matching idea's count goes
    /// up by one, the id joins the vote set, and both keys are persisted
    /// concurrently.
    pub fn vote_for_idea(&mut self, idea_id: &IdeaId) -> VoteOutcome {
        if self.user_votes.contains(idea_id) {
            debug!("Already voted for {}", idea_id);
            return VoteOutcome::AlreadyVoted;
        }

        let votes = self
            .ideas
            .iter_mut()
            .find(|idea| &idea.id == idea_id)
            .map(|idea| {
                idea.votes = idea.votes.saturating_add(1);
                idea.votes
            });

        let outcome = match votes {
            Some(votes) => VoteOutcome::Counted { votes },
            None if self.options.strict_votes => {
                warn!("Refusing vote for unknown idea {}", idea_id);
                return VoteOutcome::UnknownIdea;
            }
            None => {
                warn!("Recording vote for unknown idea {}", idea_id);
                VoteOutcome::RecordedWithoutIdea
            }
        };

        self.user_votes.insert(idea_id.clone());

        let ideas = encode(IDEAS_KEY, &self.ideas);
        let user_votes = encode(VOTES_KEY, &self.user_votes);
        let writes = [(IDEAS_KEY, ideas), (VOTES_KEY, user_votes)]
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v)))
            .collect();
        self.spawn_writes(writes);

        info!("Vote recorded for {}: {:?}", idea_id, outcome);
        self.notify(StoreEvent::VoteRecorded(idea_id.clone()));
        outcome
    }

    /// Flips the theme flag and persists it in the background. Returns the new value.
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        let dark_mode = self.dark_mode;
        debug!("Dark mode now {}", dark_mode);

        if let Some(value) = encode(THEME_KEY, &dark_mode) {
            self.spawn_writes(vec![(THEME_KEY, value)]);
        }
        self.notify(StoreEvent::ThemeChanged(dark_mode));
        dark_mode
    }

    /// Waits for every background write issued so far. Returns how many writes
    /// failed since the previous flush.
    pub async fn flush(&mut self) -> usize {
        while let Some(result) = self.pending.join_next().await {
            self.record_task(result);
        }
        std::mem::take(&mut self.failed_writes)
    }

    /// Number of background write tasks that have not been collected yet.
    #[must_use]
    pub fn pending_writes(&self) -> usize {
        self.pending.len()
    }

    /// Receiver notified after every state change.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Ideas, newest submission first.
    #[must_use]
    pub fn ideas(&self) -> &[Idea] {
        &self.ideas
    }

    #[must_use]
    pub fn idea(&self, idea_id: &IdeaId) -> Option<&Idea> {
        self.ideas.iter().find(|idea| &idea.id == idea_id)
    }

    /// Ids this device has voted for.
    #[must_use]
    pub const fn user_votes(&self) -> &BTreeSet<IdeaId> {
        &self.user_votes
    }

    #[must_use]
    pub fn has_voted(&self, idea_id: &IdeaId) -> bool {
        self.user_votes.contains(idea_id)
    }

    #[must_use]
    pub const fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// The full palette for the current theme.
    #[must_use]
    pub const fn colors(&self) -> &'static Palette {
        palette_for(self.dark_mode)
    }

    /// True once hydration has finished.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        !self.ready
    }

    #[must_use]
    pub fn sorted_ideas(&self, order: SortOrder) -> Vec<&Idea> {
        ranking::sorted_ideas(&self.ideas, order)
    }

    #[must_use]
    pub fn leaderboard(&self, kind: LeaderboardKind, limit: usize) -> Vec<RankedIdea<'_>> {
        ranking::leaderboard(&self.ideas, kind, limit)
    }

    #[must_use]
    pub fn stats(&self) -> IdeaStats {
        ranking::stats(&self.ideas)
    }

    fn spawn_writes(&mut self, writes: Vec<(&'static str, String)>) {
        // Collect finished tasks so a long session doesn't accumulate handles
        while let Some(result) = self.pending.try_join_next() {
            self.record_task(result);
        }

        let durable = Arc::clone(&self.durable);
        self.pending
            .spawn(async move { write_snapshots(durable.as_ref(), &writes).await });
    }

    fn record_task(&mut self, result: std::result::Result<usize, tokio::task::JoinError>) {
        match result {
            Ok(failed) => self.failed_writes += failed,
            Err(e) => {
                error!("Persistence task did not complete: {}", e);
                self.failed_writes += 1;
            }
        }
    }

    fn notify(&self, event: StoreEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

impl<R> Drop for IdeaStore<R> {
    fn drop(&mut self) {
        if !self.pending.is_empty() {
            debug!("Detaching {} unfinished writes", self.pending.len());
        }
        self.pending.detach_all();
    }
}

/// Writes each snapshot, side by side when two keys change together.
/// Returns how many writes failed.
async fn write_snapshots(durable: &dyn DurableStore, writes: &[(&'static str, String)]) -> usize {
    let ok = match writes {
        [] => Vec::new(),
        [(key, value)] => vec![write_logged(durable, key, value).await],
        [(k1, v1), (k2, v2)] => {
            let (a, b) = tokio::join!(write_logged(durable, k1, v1), write_logged(durable, k2, v2));
            vec![a, b]
        }
        _ => {
            let mut ok = Vec::with_capacity(writes.len());
            for (key, value) in writes {
                ok.push(write_logged(durable, key, value).await);
            }
            ok
        }
    };
    ok.into_iter().filter(|ok| !ok).count()
}

fn encode<T: serde::Serialize + ?Sized>(key: &str, value: &T) -> Option<String> {
    serde_json::to_string(value)
        .inspect_err(|e| error!("Failed to serialize '{}': {}", key, e))
        .ok()
}

async fn write_logged(durable: &dyn DurableStore, key: &str, value: &str) -> bool {
    match durable.set(key, value).await {
        Ok(()) => {
            debug!("Persisted '{}'", key);
            true
        }
        Err(e) => {
            error!("Error saving '{}': {}", key, e);
            false
        }
    }
}

async fn load_key<T: DeserializeOwned>(durable: &dyn DurableStore, key: &str) -> (Option<T>, KeyLoad) {
    let raw = match durable.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No stored value for '{}'", key);
            return (None, KeyLoad::Missing);
        }
        Err(e) => {
            warn!("Error loading '{}', using default: {}", key, e);
            return (None, KeyLoad::FellBack);
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => (Some(value), KeyLoad::Loaded),
        Err(e) => {
            warn!("Stored value for '{}' is unreadable, using default: {}", key, e);
            (None, KeyLoad::FellBack)
        }
    }
}
