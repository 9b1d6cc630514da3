//! Bare-args command dispatch for the `teamscout` binary.

use std::env;
use std::fs;
use std::io;

use rayon::prelude::*;

use crate::replay::{parse, Outcome, Team};
use crate::sources::{fetch_page, fetch_transcript, local_log_paths, urls_from_file, urls_from_forums_html};
use crate::stats::{TypeIndex, UsageCounts, DEFAULT_POKELIST_DIR};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Teams,
    Stats,
    Parse,
    Scan,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("teams") => Some(Command::Teams),
        Some("stats") => Some(Command::Stats),
        Some("parse") => Some(Command::Parse),
        Some("scan") => Some(Command::Scan),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Teams) => handle_teams(args),
        Some(Command::Stats) => handle_stats(args),
        Some(Command::Parse) => handle_parse(args),
        Some(Command::Scan) => handle_scan(args),
        None => {
            eprintln!("usage: teamscout <teams|stats|parse|scan>");
            2
        }
    }
}

fn handle_teams(args: &[String]) -> i32 {
    let Some(target) = args.get(2) else {
        eprintln!("usage: teamscout teams <url-list-file-or-log-dir>");
        return 2;
    };

    match collect_teams(target) {
        Ok(teams) => {
            for team in &teams {
                if let Some(line) = render_team_line(team) {
                    println!("{line}");
                }
            }
            0
        }
        Err(err) => {
            eprintln!("teams failed: {err}");
            1
        }
    }
}

fn handle_stats(args: &[String]) -> i32 {
    let Some(target) = args.get(2) else {
        eprintln!("usage: teamscout stats <url-list-file-or-log-dir>");
        return 2;
    };

    let pokelist_dir =
        env::var("TEAMSCOUT_POKELIST").unwrap_or_else(|_| DEFAULT_POKELIST_DIR.to_string());
    let types = match TypeIndex::load(&pokelist_dir) {
        Ok(types) => types,
        Err(err) => {
            eprintln!("stats failed: {err}");
            return 1;
        }
    };

    match collect_teams(target) {
        Ok(teams) => {
            let mut counts = UsageCounts::new();
            for team in &teams {
                counts.add_team(team, &types);
            }
            if let Err(err) = counts.write_tsv(io::stdout()) {
                eprintln!("failed to write usage table: {err}");
                return 1;
            }
            0
        }
        Err(err) => {
            eprintln!("stats failed: {err}");
            1
        }
    }
}

fn handle_parse(args: &[String]) -> i32 {
    let Some(path) = args.get(2) else {
        eprintln!("usage: teamscout parse <transcript-file>");
        return 2;
    };

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("could not read {path}: {err}");
            return 1;
        }
    };

    match parse(&text) {
        Ok(teams) => match serde_json::to_string_pretty(&teams) {
            Ok(payload) => {
                println!("{payload}");
                0
            }
            Err(err) => {
                eprintln!("failed to serialize teams: {err}");
                1
            }
        },
        Err(err) => {
            eprintln!("parse failed: {err}");
            1
        }
    }
}

fn handle_scan(args: &[String]) -> i32 {
    let (Some(url), Some(format)) = (args.get(2), args.get(3)) else {
        eprintln!("usage: teamscout scan <forums-url> <format>");
        return 2;
    };

    match fetch_page(url) {
        Ok(html) => {
            for link in urls_from_forums_html(&html, format) {
                println!("{link}");
            }
            0
        }
        Err(err) => {
            eprintln!("scan failed: {err}");
            1
        }
    }
}

/// Parse every transcript behind `target`: a directory of local log files
/// (parsed in parallel), or a file listing replay URLs (fetched
/// sequentially).
fn collect_teams(target: &str) -> Result<Vec<Team>, String> {
    let transcripts = load_transcripts(target)?;
    let parsed: Result<Vec<_>, String> = transcripts
        .par_iter()
        .map(|(label, text)| parse(text).map_err(|err| format!("{label}: {err}")))
        .collect();
    Ok(parsed?
        .into_iter()
        .flat_map(|teams| teams.into_values())
        .collect())
}

/// Load (label, transcript text) pairs for `target`.
fn load_transcripts(target: &str) -> Result<Vec<(String, String)>, String> {
    let meta = fs::metadata(target).map_err(|err| format!("{target}: {err}"))?;
    if meta.is_dir() {
        let paths = local_log_paths(target).map_err(|err| format!("{target}: {err}"))?;
        paths
            .into_iter()
            .map(|path| {
                let label = path.display().to_string();
                match fs::read_to_string(&path) {
                    Ok(text) => Ok((label, text)),
                    Err(err) => Err(format!("{label}: {err}")),
                }
            })
            .collect()
    } else {
        let urls = urls_from_file(target).map_err(|err| format!("{target}: {err}"))?;
        urls.into_iter()
            .map(|url| match fetch_transcript(&url) {
                Ok(text) => Ok((url, text)),
                Err(err) => Err(err.to_string()),
            })
            .collect()
    }
}

/// Flattened display form: handle, lead species, roster species in sorted
/// order, outcome marker, semicolon-joined. Teams with no recorded lead are
/// skipped.
fn render_team_line(team: &Team) -> Option<String> {
    let lead = team.lead.as_deref()?;
    let lead_species = team
        .roster
        .get(lead)
        .map(|entity| entity.canonical_name.as_str())
        .unwrap_or(lead);
    let marker = match team.result {
        Outcome::Win => "W",
        Outcome::Loss => "L",
    };

    let mut parts = vec![team.player.as_str(), lead_species];
    parts.extend(team.species_sorted());
    parts.push(marker);
    Some(parts.join(";"))
}
