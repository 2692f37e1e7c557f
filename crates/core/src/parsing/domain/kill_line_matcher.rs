use serde::{Deserialize, Serialize};

use super::line_cleaner::clean_ocr_line;
use super::similarity::similarity_ratio;
use crate::shared::constants::{DEFAULT_FACTION_KEYWORD, DEFAULT_MAP_KEYWORD, DEFAULT_MATCH_THRESHOLD};
use crate::shared::kill_record::KillRecord;

/// Fewest whitespace-separated tokens a kill row can have.
pub const MIN_KILL_TOKENS: usize = 5;

/// How a cleaned line is compared against the keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// The whole line is scored against each keyword.
    #[serde(rename = "whole")]
    WholeLine,
    /// Each token is scored against each keyword; the best token counts.
    Token,
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMode::WholeLine => write!(f, "whole"),
            MatchMode::Token => write!(f, "token"),
        }
    }
}

impl std::str::FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "whole" => Ok(MatchMode::WholeLine),
            "token" => Ok(MatchMode::Token),
            other => Err(format!("match mode must be 'whole' or 'token', got '{other}'")),
        }
    }
}

/// A kill row and the cleaned OCR line it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedLine {
    pub line: String,
    pub record: KillRecord,
}

/// Recognizes kill-list rows in cleaned OCR text.
///
/// A line is a candidate only when it is fuzzy-similar to both the map
/// keyword and the faction keyword. Fields are then taken by token position.
#[derive(Debug, Clone)]
pub struct KillLineMatcher {
    map_keyword: String,
    faction_keyword: String,
    threshold: f64,
    mode: MatchMode,
}

impl Default for KillLineMatcher {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAP_KEYWORD,
            DEFAULT_FACTION_KEYWORD,
            DEFAULT_MATCH_THRESHOLD,
            MatchMode::WholeLine,
        )
    }
}

impl KillLineMatcher {
    pub fn new(map_keyword: &str, faction_keyword: &str, threshold: f64, mode: MatchMode) -> Self {
        Self {
            map_keyword: map_keyword.to_string(),
            faction_keyword: faction_keyword.to_string(),
            threshold,
            mode,
        }
    }

    /// Strictly above the threshold for both keywords.
    pub fn is_candidate(&self, line: &str) -> bool {
        self.matches_keyword(line, &self.map_keyword)
            && self.matches_keyword(line, &self.faction_keyword)
    }

    fn matches_keyword(&self, line: &str, keyword: &str) -> bool {
        match self.mode {
            MatchMode::WholeLine => similarity_ratio(line, keyword) > self.threshold,
            MatchMode::Token => line
                .split_whitespace()
                .any(|token| similarity_ratio(token, keyword) > self.threshold),
        }
    }

    /// Extracts a record from one already-cleaned line.
    ///
    /// Token layout: `[1]` timestamp, `[2]` name, `[4]` faction, `[5..]`
    /// weapon. Token 0 and token 3 are not used.
    pub fn parse_line(&self, cleaned: &str) -> Option<KillRecord> {
        if !self.is_candidate(cleaned) {
            log::trace!("Rejected line: {cleaned}");
            return None;
        }
        log::debug!("Matched Kill Line: {cleaned}");

        let tokens: Vec<&str> = cleaned.split_whitespace().collect();
        if tokens.len() < MIN_KILL_TOKENS {
            log::trace!(
                "Rejected line with {} tokens (need {MIN_KILL_TOKENS}): {cleaned}",
                tokens.len()
            );
            return None;
        }

        Some(KillRecord {
            timestamp: tokens[1].to_string(),
            name: tokens[2].to_string(),
            faction: tokens[4].to_string(),
            weapon: tokens[5..].join(" "),
        })
    }

    /// Cleans and parses every line of raw OCR text, in scan order.
    pub fn parse_kill_list(&self, ocr_text: &str) -> Vec<KillRecord> {
        self.match_kill_list(ocr_text)
            .into_iter()
            .map(|matched| matched.record)
            .collect()
    }

    /// Like [`parse_kill_list`](Self::parse_kill_list), keeping the cleaned
    /// line each record came from.
    pub fn match_kill_list(&self, ocr_text: &str) -> Vec<MatchedLine> {
        ocr_text
            .lines()
            .map(clean_ocr_line)
            .filter_map(|line| {
                let record = self.parse_line(&line)?;
                Some(MatchedLine { line, record })
            })
            .collect()
    }
}
