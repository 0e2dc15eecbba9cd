//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PageState`: Tracks the state of each claimed URL (claimed, fetched, failed)

mod page_state;

// Re-export main types
pub use page_state::PageState;
