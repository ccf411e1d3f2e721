use serde::{Deserialize, Serialize};
use std::fmt;

/// Steps a download run moves through
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Loading the game page
    Navigating,
    /// Waiting for the download trigger to show up
    LocatingTrigger,
    /// Following the trigger to the mirror's gate page
    Clicking,
    /// Sitting out the gate's countdown and pressing the final control
    AwaitingCountdown,
    Completed,
    Failed,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Completed | Phase::Failed)
    }

    /// The phase that follows a successful one
    pub fn next(self) -> Phase {
        match self {
            Phase::Navigating => Phase::LocatingTrigger,
            Phase::LocatingTrigger => Phase::Clicking,
            Phase::Clicking => Phase::AwaitingCountdown,
            Phase::AwaitingCountdown => Phase::Completed,
            Phase::Completed => Phase::Completed,
            Phase::Failed => Phase::Failed,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Navigating => "navigating",
            Phase::LocatingTrigger => "locating trigger",
            Phase::Clicking => "clicking",
            Phase::AwaitingCountdown => "awaiting countdown",
            Phase::Completed => "completed",
            Phase::Failed => "failed",
        };
        f.write_str(name)
    }
}
