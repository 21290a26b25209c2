//! SubRip (SRT) subtitle cleanup.
//!
//! Turns a timed-caption file into plain text: index and timing lines are
//! dropped, inline markup is stripped, and captions repeated by overlapping
//! cues (common in auto-generated tracks) are emitted once.

use crate::error::{BrieflyError, Result};
use regex::Regex;
use std::sync::LazyLock;

static TIMING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\d{1,2}:\d{2}:\d{2}[,.]\d{1,3}\s*-->\s*\d{1,2}:\d{2}:\d{2}[,.]\d{1,3}")
        .expect("Invalid regex")
});

static MARKUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("Invalid regex"));

/// Clean raw SRT content into plain text, one retained caption line per line.
///
/// Text without any timing line is treated as already clean, which makes the
/// function idempotent.
pub fn clean_srt(raw: &str) -> Result<String> {
    let raw = raw.trim_start_matches('\u{feff}');
    if raw.trim().is_empty() {
        return Err(BrieflyError::Parse("subtitle content is empty".to_string()));
    }

    let lines: Vec<&str> = raw.lines().collect();
    if !lines.iter().any(|l| is_timing(l)) {
        let text: Vec<String> = lines.iter().filter_map(|l| clean_line(l)).collect();
        return Ok(text.join("\n"));
    }

    let mut emitted: Vec<String> = Vec::new();
    let mut previous: Vec<String> = Vec::new();
    for cue in caption_blocks(&lines) {
        if cue == previous {
            continue;
        }
        let overlap = overlap_len(&previous, &cue);
        emitted.extend(cue.iter().skip(overlap).cloned());
        previous = cue;
    }

    if emitted.is_empty() {
        return Err(BrieflyError::Parse(
            "no caption text found in subtitle blocks".to_string(),
        ));
    }

    Ok(emitted.join("\n"))
}

fn is_timing(line: &str) -> bool {
    TIMING_LINE.is_match(line)
}

fn is_index(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit())
}

/// Strip markup and collapse whitespace. `None` for lines with no text left.
fn clean_line(line: &str) -> Option<String> {
    let stripped = MARKUP.replace_all(line, "");
    let text = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() || is_timing(&text) {
        None
    } else {
        Some(text)
    }
}

/// Text lines of every cue, in file order.
///
/// A cue's text runs from its timing line to the next blank line, or to the
/// next `index` + `timing` pair for files that omit blank separators.
fn caption_blocks(lines: &[&str]) -> Vec<Vec<String>> {
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if !is_timing(lines[i]) {
            i += 1;
            continue;
        }

        let mut text = Vec::new();
        let mut j = i + 1;
        while j < lines.len() {
            let line = lines[j];
            if line.trim().is_empty() || is_timing(line) {
                break;
            }
            if is_index(line) && lines.get(j + 1).is_some_and(|next| is_timing(next)) {
                break;
            }
            if let Some(cleaned) = clean_line(line) {
                text.push(cleaned);
            }
            j += 1;
        }

        if !text.is_empty() {
            blocks.push(text);
        }
        i = j;
    }

    blocks
}

/// Lines at the start of `cue` that repeat the tail of the previous cue.
///
/// At least one line of `cue` is always left, so only a cue identical to the
/// previous one is dropped entirely.
fn overlap_len(previous: &[String], cue: &[String]) -> usize {
    let max = previous.len().min(cue.len().saturating_sub(1));
    (1..=max)
        .rev()
        .find(|&k| previous[previous.len() - k..] == cue[..k])
        .unwrap_or(0)
}
