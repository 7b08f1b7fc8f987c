//! Sharing an idea: platform share sheet first, clipboard as the fallback.
//!
//! Both platform hooks are traits so each front end plugs in whatever its
//! platform offers.

use crate::errors::{Error, Result};
use crate::models::Idea;
use async_trait::async_trait;
use tracing::{error, info, instrument};

/// Platform share sheet.
#[async_trait]
pub trait ShareSheet: Send + Sync {
    /// Whether a share sheet can be shown on this platform right now.
    async fn is_available(&self) -> bool;

    /// Presents the share sheet with `text`.
    async fn share(&self, text: &str) -> Result<()>;
}

/// Platform clipboard.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn set_text(&self, text: &str) -> Result<()>;
}

/// Which path a successful share took, so the caller can word its confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Clipboard,
}

impl ShareOutcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shared => "shared",
            Self::Clipboard => "clipboard",
        }
    }
}

/// Multi-line, human-readable summary of an idea.
#[must_use]
pub fn share_summary(idea: &Idea) -> String {
    format!(
        "🚀 Check out this startup idea: \"{}\"\n\n{}\n\nAI Rating: {}/100\nVotes: {}\n\nDescription: {}",
        idea.name, idea.tagline, idea.rating, idea.votes, idea.description
    )
}

/// Shares `idea` through `sheet` if it is available, otherwise copies the
/// summary to `clipboard`.
///
/// # Errors
/// Returns `Error::Share` if the chosen path fails. The clipboard is not tried
/// after a share sheet failure.
#[instrument(skip_all, fields(idea_id = %idea.id))]
pub async fn share_idea(
    idea: &Idea,
    sheet: &dyn ShareSheet,
    clipboard: &dyn Clipboard,
) -> Result<ShareOutcome> {
    let text = share_summary(idea);

    let outcome = if sheet.is_available().await {
        sheet.share(&text).await.map(|()| ShareOutcome::Shared)
    } else {
        clipboard.set_text(&text).await.map(|()| ShareOutcome::Clipboard)
    };

    match outcome {
        Ok(outcome) => {
            info!("Idea shared via {}", outcome.as_str());
            Ok(outcome)
        }
        Err(e) => {
            error!("Error sharing idea: {}", e);
            Err(Error::Share(e.to_string()))
        }
    }
}
