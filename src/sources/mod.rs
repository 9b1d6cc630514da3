//! Transcript sources: URL lists, forum-page scans, local log directories and
//! the HTTP fetch itself. The parsing engine never touches these.

mod fetch;
mod locate;

pub use fetch::{fetch_page, fetch_transcript, FetchError};
pub use locate::{local_log_paths, urls_from_file, urls_from_forums_html};
