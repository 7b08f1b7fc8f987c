//! Runs one CLI command against a hydrated store and renders the result as text.

use super::Command;
use crate::core::ranking::{LeaderboardKind, rating_label};
use crate::core::share::{Clipboard, ShareOutcome, ShareSheet, share_idea};
use crate::core::store::{IdeaStore, VoteOutcome};
use crate::errors::{Error, Result};
use crate::models::{Idea, IdeaId, NewIdea};
use async_trait::async_trait;
use rand::Rng;
use std::fmt::Write as _;
use std::sync::Mutex;
use tracing::{info, instrument};

/// Terminals have no share sheet; sharing always falls through to the clipboard.
#[derive(Debug, Default)]
pub struct TerminalShareSheet;

#[async_trait]
impl ShareSheet for TerminalShareSheet {
    async fn is_available(&self) -> bool {
        false
    }

    async fn share(&self, _text: &str) -> Result<()> {
        Err(Error::Share("no share sheet on a terminal".to_string()))
    }
}

/// Clipboard stand-in that keeps the copied text so it can be printed.
#[derive(Debug, Default)]
pub struct TerminalClipboard {
    text: Mutex<Option<String>>,
}

impl TerminalClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last text copied, if any.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.text.lock().ok().and_then(|t| t.clone())
    }
}

#[async_trait]
impl Clipboard for TerminalClipboard {
    async fn set_text(&self, text: &str) -> Result<()> {
        let mut slot = self.text.lock().map_err(|e| Error::Storage(e.to_string()))?;
        *slot = Some(text.to_string());
        Ok(())
    }
}

/// Executes `command` and returns the text to show the user.
///
/// # Errors
/// Returns `Error::MissingField` for blank submissions, `Error::IdeaNotFound`
/// when `show`, `share` or a strict-mode `vote` names an unknown id, and
/// `Error::Share` if sharing fails.
#[instrument(skip(store, sheet, clipboard))]
pub async fn run_command<R: Rng>(
    store: &mut IdeaStore<R>,
    command: Command,
    leaderboard_size: usize,
    sheet: &dyn ShareSheet,
    clipboard: &TerminalClipboard,
) -> Result<String> {
    match command {
        Command::Submit {
            name,
            tagline,
            description,
        } => {
            let new_idea = NewIdea::new(name, tagline, description).validated()?;
            let idea = store.submit_idea(new_idea);
            Ok(format!(
                "🚀 Idea Submitted Successfully!\nAI gave you a {}/100 rating!\nid: {}\nAI Feedback: {}",
                idea.rating, idea.id, idea.feedback
            ))
        }
        Command::Vote { id } => {
            let id = IdeaId::from(id);
            match store.vote_for_idea(&id) {
                VoteOutcome::Counted { votes } => Ok(format!(
                    "Vote Recorded Successfully! Thanks for supporting this idea. ({votes} votes)"
                )),
                VoteOutcome::AlreadyVoted => {
                    Ok("Already Voted: you can only vote once per idea.".to_string())
                }
                VoteOutcome::RecordedWithoutIdea => {
                    Ok(format!("Vote recorded, but no idea has id {id}."))
                }
                VoteOutcome::UnknownIdea => Err(Error::IdeaNotFound(id.to_string())),
            }
        }
        Command::List { sort } => {
            let ideas = store.sorted_ideas(sort.into());
            if ideas.is_empty() {
                return Ok("No ideas yet. Submit the first one!".to_string());
            }
            let mut out = format!("{} innovative concepts to explore\n", ideas.len());
            for idea in ideas {
                let _ = writeln!(out, "{}", idea_line(idea, store.has_voted(&idea.id)));
            }
            Ok(out.trim_end().to_string())
        }
        Command::Show { id } => {
            let idea = find(store, &id)?;
            Ok(format!(
                "{}\n\n{}\n\nAI Feedback: {}",
                idea_line(idea, store.has_voted(&idea.id)),
                idea.description,
                idea.feedback
            ))
        }
        Command::Leaderboard { by, limit } => {
            let kind = LeaderboardKind::from(by);
            let board = store.leaderboard(kind, limit.unwrap_or(leaderboard_size));
            if board.is_empty() {
                return Ok("No ideas to rank yet.".to_string());
            }
            let mut out = String::new();
            for entry in board {
                let metric = match kind {
                    LeaderboardKind::Votes => format!("{} votes", entry.idea.votes),
                    LeaderboardKind::Rating => format!("{}/100", entry.idea.rating),
                };
                let _ = writeln!(out, "#{} {} ({metric})", entry.rank, entry.idea.name);
            }
            Ok(out.trim_end().to_string())
        }
        Command::Stats => {
            let stats = store.stats();
            let average = stats
                .average_rating
                .map_or_else(|| "-".to_string(), |r| r.to_string());
            Ok(format!(
                "Total ideas: {}\nTotal votes: {}\nAverage rating: {}",
                stats.total_ideas, stats.total_votes, average
            ))
        }
        Command::Theme => {
            let dark = store.toggle_dark_mode();
            info!("Theme toggled, background now {}", store.colors().background);
            Ok(format!("Dark mode {}", if dark { "on" } else { "off" }))
        }
        Command::Share { id } => {
            let idea = find(store, &id)?;
            match share_idea(idea, sheet, clipboard).await? {
                ShareOutcome::Shared => {
                    Ok("Shared Successfully! Thanks for spreading the word.".to_string())
                }
                ShareOutcome::Clipboard => Ok(format!(
                    "Copied to Clipboard:\n\n{}",
                    clipboard.text().unwrap_or_default()
                )),
            }
        }
    }
}

fn find<'a, R: Rng>(store: &'a IdeaStore<R>, id: &str) -> Result<&'a Idea> {
    store
        .idea(&IdeaId::from(id))
        .ok_or_else(|| Error::IdeaNotFound(id.to_string()))
}

fn idea_line(idea: &Idea, voted: bool) -> String {
    format!(
        "[{}] {} - {} | {} {} | {} votes{}",
        idea.id,
        idea.name,
        idea.tagline,
        idea.rating,
        rating_label(idea.rating),
        idea.votes,
        if voted { " ♥" } else { "" }
    )
}
