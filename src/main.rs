use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use salamina_feed::team_data::TeamData;
use salamina_feed::team_fetch::{self, TEAM_ID};
use salamina_feed::team_views::TeamSnapshot;

#[derive(Serialize)]
struct SnapshotOutput {
    team_id: u32,
    generated_at: String,
    source: String,
    #[serde(flatten)]
    views: TeamSnapshot,
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_target(false)
        .with_ansi(false)
        .compact();
    tracing_subscriber::fmt()
        .event_format(format)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Optional path to a saved team response; skips the network entirely.
    let (data, source) = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("could not read {}", path.display()))?;
            let data = team_fetch::parse_team_data_json(&raw)?;
            (Arc::new(data), path.display().to_string())
        }
        None => {
            let data: Arc<TeamData> =
                team_fetch::get_team_data().context("no team data available")?;
            (data, "fotmob".to_string())
        }
    };

    let output = SnapshotOutput {
        team_id: TEAM_ID,
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        source,
        views: TeamSnapshot::from_data(&data),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
