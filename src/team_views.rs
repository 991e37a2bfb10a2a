//! Bounded, UI-ready views over a [`TeamData`] document.
//!
//! Every function here is total: a missing section yields `None` or an empty
//! vec, and missing fields inside a present section fall back to defaults.
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::team_data::{
    TeamData, TeamRef, TextOrNumber, TopPlayer, TopPlayers, TopPlayersCategory,
};
use crate::team_fetch::TEAM_ID;

const TOP_PLAYERS_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeagueTableRow {
    pub id: u32,
    pub name: String,
    pub short_name: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goal_difference: i32,
    pub points: i32,
    /// Rank as sent by FotMob (`idx`), 1-based.
    pub position: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qual_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableLegendEntry {
    pub color: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeagueTable {
    pub rows: Vec<LeagueTableRow>,
    pub legend: Vec<TableLegendEntry>,
}

impl LeagueTable {
    /// Row of the tracked team, if it is in this table.
    pub fn tracked_row(&self) -> Option<&LeagueTableRow> {
        self.rows.iter().find(|row| row.id == TEAM_ID)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopScorer {
    pub name: String,
    pub goals: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopAssister {
    pub name: String,
    pub assists: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeagueRanking {
    pub label: String,
    pub translation_key: String,
    pub value: String,
    pub rank: u32,
    pub total_teams: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueInfo {
    pub name: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_opened: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextMatchInfo {
    pub opponent_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utc_time: Option<String>,
    pub is_home: bool,
}

impl NextMatchInfo {
    pub fn kickoff(&self) -> Option<DateTime<Utc>> {
        let raw = self.utc_time.as_deref()?.trim();
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FormResult {
    Win,
    Draw,
    Loss,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormEntry {
    pub result: FormResult,
    pub score: String,
    pub opponent_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LastMatchInfo {
    pub opponent_name: String,
    pub is_home: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals_for: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals_against: Option<u32>,
}

impl LastMatchInfo {
    pub fn outcome(&self) -> Option<FormResult> {
        let (gf, ga) = (self.goals_for?, self.goals_against?);
        Some(match gf.cmp(&ga) {
            std::cmp::Ordering::Greater => FormResult::Win,
            std::cmp::Ordering::Equal => FormResult::Draw,
            std::cmp::Ordering::Less => FormResult::Loss,
        })
    }
}

/// Every view at once, as handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamSnapshot {
    pub league_table: Option<LeagueTable>,
    pub top_scorers: Vec<TopScorer>,
    pub top_assists: Vec<TopAssister>,
    pub league_rankings: Vec<LeagueRanking>,
    pub venue: Option<VenueInfo>,
    pub next_match: Option<NextMatchInfo>,
    pub last_match: Option<LastMatchInfo>,
    pub form: Vec<FormEntry>,
}

impl TeamSnapshot {
    pub fn from_data(data: &TeamData) -> Self {
        Self {
            league_table: parse_league_table(data),
            top_scorers: parse_top_scorers(data),
            top_assists: parse_top_assists(data),
            league_rankings: parse_league_rankings(data),
            venue: parse_venue_info(data),
            next_match: parse_next_match(data),
            last_match: parse_last_match(data),
            form: parse_team_form(data),
        }
    }
}

/// League table from the first entry of `overview.table`.
///
/// Cup and group-stage competitions can send several tables; only the first
/// one is used.
pub fn parse_league_table(data: &TeamData) -> Option<LeagueTable> {
    let tables = data.overview.as_ref()?.table.as_ref()?;
    let table = tables.first()?;

    let rows = table
        .all
        .iter()
        .flatten()
        .map(|row| LeagueTableRow {
            id: row.id.unwrap_or(0),
            name: row.name.clone().unwrap_or_default(),
            short_name: row.short_name.clone().unwrap_or_default(),
            played: row.played.unwrap_or(0),
            wins: row.wins.unwrap_or(0),
            draws: row.draws.unwrap_or(0),
            losses: row.losses.unwrap_or(0),
            goal_difference: row.goal_difference.unwrap_or(0),
            points: row.pts.unwrap_or(0),
            position: row.idx.unwrap_or(0),
            qual_color: row.qual_color.clone(),
        })
        .collect();

    let legend = table
        .legend
        .iter()
        .flatten()
        .map(|entry| TableLegendEntry {
            color: entry.color.clone().unwrap_or_default(),
            title: entry.title.clone().unwrap_or_default(),
        })
        .collect();

    Some(LeagueTable { rows, legend })
}

pub fn parse_top_scorers(data: &TeamData) -> Vec<TopScorer> {
    top_players(data, |top| top.by_goals.as_ref())
        .iter()
        .take(TOP_PLAYERS_LIMIT)
        .map(|p| TopScorer {
            name: p.name.clone().unwrap_or_default(),
            goals: p.goals.unwrap_or(0),
        })
        .collect()
}

pub fn parse_top_assists(data: &TeamData) -> Vec<TopAssister> {
    top_players(data, |top| top.by_assists.as_ref())
        .iter()
        .take(TOP_PLAYERS_LIMIT)
        .map(|p| TopAssister {
            name: p.name.clone().unwrap_or_default(),
            assists: p.assists.unwrap_or(0),
        })
        .collect()
}

fn top_players<'a>(
    data: &'a TeamData,
    pick: impl Fn(&'a TopPlayers) -> Option<&'a TopPlayersCategory>,
) -> &'a [TopPlayer] {
    data.overview
        .as_ref()
        .and_then(|o| o.top_players.as_ref())
        .and_then(pick)
        .and_then(|cat| cat.players.as_deref())
        .unwrap_or_default()
}

/// One ranking per stat category that lists the tracked team.
pub fn parse_league_rankings(data: &TeamData) -> Vec<LeagueRanking> {
    let Some(categories) = data.stats.as_ref().and_then(|s| s.teams.as_ref()) else {
        return Vec::new();
    };

    let mut rankings = Vec::new();
    for cat in categories {
        let team_data = cat.team_data.as_deref().unwrap_or_default();
        let Some(entry) = team_data.iter().find(|t| t.team_id == Some(TEAM_ID)) else {
            continue;
        };
        let header = cat.header.clone().unwrap_or_default();
        let translation_key = non_empty(cat.localized_title_id.as_deref())
            .unwrap_or(&header)
            .to_string();
        let value = text_value(entry.value.as_ref())
            .or_else(|| text_value(cat.team_value.as_ref()))
            .unwrap_or_default();
        rankings.push(LeagueRanking {
            label: header,
            translation_key,
            value,
            rank: entry.rank.unwrap_or(0),
            total_teams: team_data.len(),
        });
    }
    rankings
}

pub fn parse_venue_info(data: &TeamData) -> Option<VenueInfo> {
    let venue = data.overview.as_ref()?.venue.as_ref()?;
    let widget = venue.widget.as_ref();

    // Outer `Some` marks "already matched" so a matching stat without a value
    // still blocks later matches.
    let mut capacity: Option<Option<String>> = None;
    let mut surface: Option<Option<String>> = None;
    let mut year_opened: Option<Option<String>> = None;

    for stat in venue.stat_pairs.iter().flatten().flatten() {
        let title = stat.title.as_deref().unwrap_or_default().to_lowercase();
        let value = || stat.value.as_ref().map(TextOrNumber::to_text);
        if title.contains("capacity") {
            capacity = capacity.or_else(|| Some(value()));
        }
        if title.contains("surface") {
            surface = surface.or_else(|| Some(value()));
        }
        if title.contains("year") || title.contains("opened") {
            year_opened = year_opened.or_else(|| Some(value()));
        }
    }

    Some(VenueInfo {
        name: widget.and_then(|w| w.name.clone()).unwrap_or_default(),
        city: widget.and_then(|w| w.city.clone()).unwrap_or_default(),
        capacity: capacity.flatten(),
        surface: surface.flatten(),
        year_opened: year_opened.flatten(),
    })
}

pub fn parse_next_match(data: &TeamData) -> Option<NextMatchInfo> {
    let next = data.overview.as_ref()?.next_match.as_ref()?;
    let (is_home, opponent_name) =
        side_and_opponent(next.home.as_ref(), next.away.as_ref(), next.opponent.as_ref());

    Some(NextMatchInfo {
        opponent_name,
        utc_time: next.status.as_ref().and_then(|s| s.utc_time.clone()),
        is_home,
    })
}

pub fn parse_last_match(data: &TeamData) -> Option<LastMatchInfo> {
    let last = data.overview.as_ref()?.last_match.as_ref()?;
    let (is_home, opponent_name) =
        side_and_opponent(last.home.as_ref(), last.away.as_ref(), last.opponent.as_ref());

    let home_score = last.home.as_ref().and_then(|t| t.score);
    let away_score = last.away.as_ref().and_then(|t| t.score);
    let (goals_for, goals_against) = match (home_score, away_score) {
        (Some(h), Some(a)) if is_home => (Some(h), Some(a)),
        (Some(h), Some(a)) => (Some(a), Some(h)),
        _ => (None, None),
    };

    Some(LastMatchInfo {
        opponent_name,
        is_home,
        goals_for,
        goals_against,
    })
}

pub fn parse_team_form(data: &TeamData) -> Vec<FormEntry> {
    let Some(form) = data.overview.as_ref().and_then(|o| o.team_form.as_ref()) else {
        return Vec::new();
    };

    form.iter()
        .map(|entry| FormEntry {
            result: form_result(entry.result, entry.result_string.as_deref()),
            score: entry.score.clone().unwrap_or_default(),
            opponent_name: entry
                .opponent
                .as_ref()
                .and_then(|o| o.name.clone())
                .unwrap_or_default(),
        })
        .collect()
}

/// `is_home` is decided by the home side's id; the opponent is the other
/// side's name, then the match-level `opponent`, then empty.
fn side_and_opponent(
    home: Option<&TeamRef>,
    away: Option<&TeamRef>,
    opponent: Option<&TeamRef>,
) -> (bool, String) {
    let is_home = home.and_then(|t| t.id) == Some(TEAM_ID);
    let other = if is_home { away } else { home };
    let name = team_name(other)
        .or_else(|| team_name(opponent))
        .unwrap_or_default()
        .to_string();
    (is_home, name)
}

fn team_name(team: Option<&TeamRef>) -> Option<&str> {
    non_empty(team.and_then(|t| t.name.as_deref()))
}

fn form_result(code: Option<u8>, letter: Option<&str>) -> FormResult {
    match code {
        Some(3) => return FormResult::Win,
        Some(1) => return FormResult::Draw,
        Some(0) => return FormResult::Loss,
        _ => {}
    }
    match letter.map(|s| s.trim().to_ascii_uppercase()).as_deref() {
        Some("W") => FormResult::Win,
        Some("D") => FormResult::Draw,
        Some("L") => FormResult::Loss,
        _ => FormResult::Unknown,
    }
}

fn text_value(value: Option<&TextOrNumber>) -> Option<String> {
    value.map(TextOrNumber::to_text).filter(|s| !s.is_empty())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
