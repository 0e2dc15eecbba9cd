/// Page state definitions for tracking crawl progress
///
/// A URL that has never been seen is simply absent from the visited set. Once a
/// worker claims it, it moves through the states below exactly once.
use std::fmt;

/// Represents the current state of a claimed URL in the crawl process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    /// URL has been claimed by a worker and is being fetched
    Claimed,

    /// Page was fetched and its HTML stored
    Fetched,

    /// Fetch failed (network error, timeout, non-2xx status)
    Failed,
}

impl PageState {
    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Claimed)
    }

    /// Returns true if the page was stored
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Fetched)
    }

    /// Checks whether moving from this state to `next` is allowed
    ///
    /// Only a claimed URL moves, and only into a terminal state.
    pub fn can_transition_to(&self, next: PageState) -> bool {
        !self.is_terminal() && next.is_terminal()
    }

    /// Returns the lowercase label used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Claimed => "claimed",
            Self::Fetched => "fetched",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
