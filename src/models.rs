use crate::skills::{self, SECONDS_IN_DAY, SECONDS_IN_MONTH, SECONDS_IN_WEEK, Skill};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// The `type=` tag selecting a tracker operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Update,
    LastCheck,
    LastChange,
    Stats,
    Ttm,
    TtmRank,
    FormatName,
    Search,
    RecordsOfPlayer,
    Track,
    Datapoints,
}

impl Operation {
    pub fn tag(self) -> &'static str {
        match self {
            Operation::Update => "update",
            Operation::LastCheck => "lastcheck",
            Operation::LastChange => "lastchange",
            Operation::Stats => "stats",
            Operation::Ttm => "ttm",
            Operation::TtmRank => "ttmrank",
            Operation::FormatName => "formatname",
            Operation::Search => "search",
            Operation::RecordsOfPlayer => "recordsofplayer",
            Operation::Track => "track",
            Operation::Datapoints => "datapoints",
        }
    }
}

/// Named time spans accepted by `track` and `datapoints`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    Day,
    Week,
    /// Rolling 31 days.
    Month,
    /// No lower bound.
    All,
}

impl Period {
    pub fn seconds(self) -> u64 {
        match self {
            Period::Day => SECONDS_IN_DAY,
            Period::Week => SECONDS_IN_WEEK,
            Period::Month => SECONDS_IN_MONTH,
            Period::All => 0,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty response")]
    Empty,
    #[error("line {line}: expected {expected} comma-separated integers, got {got:?}")]
    BadRow {
        line: usize,
        expected: usize,
        got: String,
    },
    #[error("bad timestamp line: {0:?}")]
    BadTimestamp(String),
    #[error("unknown update code: {0:?}")]
    UnknownCode(String),
    /// The tracker answered with a bare status code instead of data.
    #[error("tracker returned error code {0}")]
    ErrorCode(i64),
    #[error("expected at least {expected} skill rows, got {got}")]
    TooFewRows { expected: usize, got: usize },
}

/// Decoded result of an `update` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateStatus {
    Success,
    NotOnHiscores,
    NegativeXpGain,
    UnknownError,
    /// The player was updated within the last 60 seconds.
    TooSoon,
    InvalidName,
}

impl UpdateStatus {
    pub fn code(self) -> u8 {
        match self {
            UpdateStatus::Success => 1,
            UpdateStatus::NotOnHiscores => 2,
            UpdateStatus::NegativeXpGain => 3,
            UpdateStatus::UnknownError => 4,
            UpdateStatus::TooSoon => 5,
            UpdateStatus::InvalidName => 6,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            UpdateStatus::Success => "Success!",
            UpdateStatus::NotOnHiscores => "Player not on RuneScape hiscores.",
            UpdateStatus::NegativeXpGain => "Negative XP gain detected.",
            UpdateStatus::UnknownError => "Unknown error.",
            UpdateStatus::TooSoon => "This player has been updated within the last 60 seconds.",
            UpdateStatus::InvalidName => "The player name was invalid.",
        }
    }
}

impl FromStr for UpdateStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(UpdateStatus::Success),
            "2" => Ok(UpdateStatus::NotOnHiscores),
            "3" => Ok(UpdateStatus::NegativeXpGain),
            "4" => Ok(UpdateStatus::UnknownError),
            "5" => Ok(UpdateStatus::TooSoon),
            "6" => Ok(UpdateStatus::InvalidName),
            other => Err(ParseError::UnknownCode(other.to_string())),
        }
    }
}

/// One `xp,rank` row of a stats response. Unranked skills report `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillStat {
    pub xp: i64,
    pub rank: i64,
}

impl SkillStat {
    /// Level for this row's experience; negative experience counts as zero.
    pub fn level(&self) -> u32 {
        skills::level(clamp_xp(self.xp))
    }

    pub fn virtual_level(&self) -> u32 {
        skills::virtual_level(clamp_xp(self.xp))
    }
}

fn clamp_xp(xp: i64) -> u32 {
    xp.clamp(0, i64::from(u32::MAX)) as u32
}

/// Parsed `stats` response.
///
/// Rows follow `Skill::ALL` order; the tracker may append extra columns
/// (EHP at `skills::EHP_INDEX`), which are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Unix time of the most recent datapoint.
    pub timestamp: i64,
    pub skills: Vec<SkillStat>,
}

impl Stats {
    pub fn get(&self, skill: Skill) -> Option<&SkillStat> {
        self.skills.get(skill.index())
    }

    /// Skill rows paired with their skill, dropping trailing non-skill columns.
    pub fn iter_skills(&self) -> impl Iterator<Item = (Skill, &SkillStat)> {
        Skill::ALL.iter().copied().zip(self.skills.iter())
    }

    pub fn ehp(&self) -> Option<&SkillStat> {
        self.skills.get(skills::EHP_INDEX)
    }
}

impl FromStr for Stats {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (timestamp, rows) = split_timestamped(s)?;
        let skills = rows
            .map(|(line, text)| {
                let [xp, rank] = parse_row::<2>(line, text)?;
                Ok::<_, ParseError>(SkillStat { xp, rank })
            })
            .collect::<Result<Vec<_>, _>>()?;
        check_rows(timestamp, skills.len())?;
        Ok(Stats { timestamp, skills })
    }
}

/// One row of a `track` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGain {
    pub xp_gained: i64,
    pub rank_change: i64,
    /// Experience at the start of the window.
    pub xp_start: i64,
}

/// Parsed `track` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unix time of the earliest datapoint in the window.
    pub timestamp: i64,
    pub gains: Vec<SkillGain>,
}

impl Track {
    pub fn get(&self, skill: Skill) -> Option<&SkillGain> {
        self.gains.get(skill.index())
    }
}

impl FromStr for Track {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (timestamp, rows) = split_timestamped(s)?;
        let gains = rows
            .map(|(line, text)| {
                let [xp_gained, rank_change, xp_start] = parse_row::<3>(line, text)?;
                Ok::<_, ParseError>(SkillGain {
                    xp_gained,
                    rank_change,
                    xp_start,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        check_rows(timestamp, gains.len())?;
        Ok(Track { timestamp, gains })
    }
}

/// Parsed `search` response: a match count and the matching names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub count: usize,
    pub names: Vec<String>,
}

impl FromStr for SearchResult {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseError::Empty);
        }
        let (count, rest) = s.split_once(char::is_whitespace).unwrap_or((s, ""));
        let count = count.parse::<usize>().map_err(|_| ParseError::BadRow {
            line: 1,
            expected: 1,
            got: s.to_string(),
        })?;
        let names = rest
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(String::from)
            .collect();
        Ok(SearchResult { count, names })
    }
}

type Rows<'a> = Box<dyn Iterator<Item = (usize, &'a str)> + 'a>;

/// Split off the leading timestamp line; returns the remaining non-empty lines
/// numbered from 2.
fn split_timestamped(s: &str) -> Result<(i64, Rows<'_>), ParseError> {
    let mut lines = s.lines().enumerate().map(|(i, l)| (i + 1, l.trim()));
    let (_, first) = lines.next().filter(|(_, l)| !l.is_empty()).ok_or(ParseError::Empty)?;
    let timestamp = first
        .parse::<i64>()
        .map_err(|_| ParseError::BadTimestamp(first.to_string()))?;
    Ok((timestamp, Box::new(lines.filter(|(_, l)| !l.is_empty()))))
}

/// Every skill needs a row. A lone negative line is a tracker error code.
fn check_rows(timestamp: i64, rows: usize) -> Result<(), ParseError> {
    if rows == 0 && timestamp < 0 {
        return Err(ParseError::ErrorCode(timestamp));
    }
    if rows < Skill::ALL.len() {
        return Err(ParseError::TooFewRows {
            expected: Skill::ALL.len(),
            got: rows,
        });
    }
    Ok(())
}

fn parse_row<const N: usize>(line: usize, text: &str) -> Result<[i64; N], ParseError> {
    let bad = || ParseError::BadRow {
        line,
        expected: N,
        got: text.to_string(),
    };
    let mut out = [0i64; N];
    let mut fields = text.split(',');
    for slot in out.iter_mut() {
        *slot = fields
            .next()
            .and_then(|f| f.trim().parse().ok())
            .ok_or_else(bad)?;
    }
    if fields.next().is_some() {
        return Err(bad());
    }
    Ok(out)
}
