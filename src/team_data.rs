//! Wire types for the FotMob team endpoint (`/api/data/teams`).
//!
//! Only the sections the views read are modelled. Everything below the top
//! level is an `Option`: FotMob drops whole blocks for teams outside a league
//! season, sends explicit `null`s for fields it has no value for, and fields
//! come and go between deploys. Defaults are applied in `team_views`.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamData {
    pub overview: Option<Overview>,
    pub stats: Option<TeamStats>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub table: Option<Vec<Table>>,
    pub top_players: Option<TopPlayers>,
    pub team_form: Option<Vec<TeamFormEntry>>,
    pub next_match: Option<NextMatch>,
    pub last_match: Option<LastMatch>,
    pub venue: Option<Venue>,
    pub team_colors: Option<TeamColors>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    pub all: Option<Vec<TableRow>>,
    pub legend: Option<Vec<TableLegend>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub played: Option<u32>,
    pub wins: Option<u32>,
    pub draws: Option<u32>,
    pub losses: Option<u32>,
    pub goal_difference: Option<i32>,
    /// Signed: points deductions can push a total below zero.
    pub pts: Option<i32>,
    pub idx: Option<u32>,
    pub qual_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLegend {
    pub color: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPlayers {
    pub by_goals: Option<TopPlayersCategory>,
    pub by_assists: Option<TopPlayersCategory>,
    pub by_rating: Option<TopPlayersCategory>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopPlayersCategory {
    pub header: Option<String>,
    pub players: Option<Vec<TopPlayer>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPlayer {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub goals: Option<u32>,
    pub assists: Option<u32>,
    pub rating: Option<TextOrNumber>,
    pub team_id: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamFormEntry {
    /// 3 = win, 1 = draw, 0 = loss.
    pub result: Option<u8>,
    pub result_string: Option<String>,
    pub score: Option<String>,
    pub opponent: Option<TeamRef>,
}

/// Team reference as it appears inside match blocks. `score` is only sent
/// for played matches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub score: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextMatch {
    pub id: Option<TextOrNumber>,
    pub opponent: Option<TeamRef>,
    pub home: Option<TeamRef>,
    pub away: Option<TeamRef>,
    pub not_started: Option<bool>,
    pub status: Option<MatchStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStatus {
    pub utc_time: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LastMatch {
    pub id: Option<TextOrNumber>,
    pub opponent: Option<TeamRef>,
    pub home: Option<TeamRef>,
    pub away: Option<TeamRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub widget: Option<VenueWidget>,
    pub stat_pairs: Option<Vec<Vec<VenueStat>>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VenueWidget {
    pub name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub lat: Option<f64>,
    pub long: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VenueStat {
    pub title: Option<String>,
    pub value: Option<TextOrNumber>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamColors {
    pub dark_mode: Option<String>,
    pub light_mode: Option<String>,
    pub font_dark_mode: Option<String>,
    pub font_light_mode: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamStats {
    pub teams: Option<Vec<TeamStatCategory>>,
    pub players: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStatCategory {
    pub header: Option<String>,
    pub localized_title_id: Option<String>,
    pub team_value: Option<TextOrNumber>,
    pub team_data: Option<Vec<TeamStatEntry>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStatEntry {
    pub team_name: Option<String>,
    pub team_id: Option<u32>,
    pub value: Option<TextOrNumber>,
    pub rank: Option<u32>,
}

/// Scalar FotMob sends as either a string or a number depending on the
/// stat (`"1.45"`, `12`, `"8 000"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl TextOrNumber {
    pub fn to_text(&self) -> String {
        match self {
            TextOrNumber::Text(s) => s.trim().to_string(),
            TextOrNumber::Number(n) => n.to_string(),
        }
    }
}
