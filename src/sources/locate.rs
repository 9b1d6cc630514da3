//! Locate replay transcripts: URL lists from files, links scraped from a
//! forums page, and local log directories.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const REPLAY_URL_PREFIX: &str = "https://replay.pokemonshowdown.com/";

/// Normalize one candidate link: upgrade plain `http://`, and expand the
/// scheme-less `replay.pokemonshowdown.com/...` shorthand common in forum
/// posts.
fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("replay") {
        return format!("https://{trimmed}");
    }
    trimmed.replacen("http://", "https://", 1)
}

/// Read replay URLs from a text file, one candidate per line. Lines that do
/// not normalize to a replay-host URL are skipped.
pub fn urls_from_file(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(normalize_url)
        .filter(|url| url.starts_with(REPLAY_URL_PREFIX))
        .collect())
}

/// Replay links for `format` found in a forums page body, covering both the
/// direct and tournament (`smogtours-`) hosts.
pub fn urls_from_forums_html(html: &str, format: &str) -> Vec<String> {
    let direct = format!("{REPLAY_URL_PREFIX}{format}");
    let smogtours = format!("{REPLAY_URL_PREFIX}smogtours-{format}");
    extract_hrefs(html)
        .into_iter()
        .map(|href| normalize_url(&href))
        .filter(|url| url.starts_with(&direct) || url.starts_with(&smogtours))
        .collect()
}

/// All `href="..."` attribute values, in document order.
fn extract_hrefs(html: &str) -> Vec<String> {
    let mut hrefs = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find("href=\"") {
        rest = &rest[start + 6..];
        let Some(end) = rest.find('"') else { break };
        hrefs.push(rest[..end].to_string());
        rest = &rest[end + 1..];
    }
    hrefs
}

/// Paths of every file in a local replay log directory, sorted by name.
pub fn local_log_paths(dir: impl AsRef<Path>) -> io::Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    paths.sort();
    Ok(paths)
}
