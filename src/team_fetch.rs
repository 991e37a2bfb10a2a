use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use tracing::{debug, info, warn};

use crate::config::FeedConfig;
use crate::http_cache::TeamDataCache;
use crate::http_client::http_client;
use crate::team_data::TeamData;

/// FotMob id of Nea Salamina.
pub const TEAM_ID: u32 = 8590;
pub const COUNTRY_CODE: &str = "CYP";

/// Anything that can produce a fresh team document. The HTTP implementation
/// is [`FotmobTeamSource`]; tests plug in canned sources.
pub trait TeamDataSource: Send + Sync {
    fn fetch_team_data(&self) -> Result<TeamData>;
}

pub struct FotmobTeamSource {
    client: Client,
    url: String,
    user_agent: String,
}

impl FotmobTeamSource {
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = http_client(config.timeout)?.clone();
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &FeedConfig) -> Self {
        Self {
            client,
            url: team_url(&config.api_base),
            user_agent: config.user_agent.clone(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TeamDataSource for FotmobTeamSource {
    fn fetch_team_data(&self) -> Result<TeamData> {
        let before = Instant::now();
        let resp = self
            .client
            .get(&self.url)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, "application/json")
            .send()
            .context("team request failed")?;
        let status = resp.status();
        let body = resp.text().context("failed reading team body")?;
        if !status.is_success() {
            return Err(anyhow::anyhow!("http {status}"));
        }
        debug!(
            "[FETCH] {} -> {status}, {} bytes in {:.2?}",
            self.url,
            body.len(),
            before.elapsed()
        );
        parse_team_data_json(&body)
    }
}

pub fn team_url(api_base: &str) -> String {
    format!(
        "{}/data/teams?id={TEAM_ID}&ccode3={COUNTRY_CODE}",
        api_base.trim_end_matches('/')
    )
}

/// Decodes a team body. Unlike the listing endpoints, an empty or `null`
/// body here is an error: there is no meaningful empty team document.
pub fn parse_team_data_json(raw: &str) -> Result<TeamData> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(anyhow::anyhow!("empty team response"));
    }
    serde_json::from_str(trimmed).context("invalid team json")
}

enum SharedSource {
    Fotmob(FotmobTeamSource),
    Unavailable(String),
}

impl TeamDataSource for SharedSource {
    fn fetch_team_data(&self) -> Result<TeamData> {
        match self {
            SharedSource::Fotmob(source) => source.fetch_team_data(),
            SharedSource::Unavailable(reason) => Err(anyhow::anyhow!("{reason}")),
        }
    }
}

static TEAM_CACHE: Lazy<TeamDataCache<SharedSource>> = Lazy::new(|| {
    let config = FeedConfig::from_env();
    let source = match FotmobTeamSource::new(&config) {
        Ok(source) => SharedSource::Fotmob(source),
        Err(err) => SharedSource::Unavailable(format!("{err:#}")),
    };
    let cache = TeamDataCache::new(source, config.cache_ttl);
    match cache.source() {
        SharedSource::Fotmob(source) => info!(
            "[FETCH] team feed {} (ttl {:?}, timeout {:?})",
            source.url(),
            cache.ttl(),
            config.timeout
        ),
        SharedSource::Unavailable(reason) => warn!("[FETCH] team feed unavailable: {reason}"),
    }
    cache
});

/// Process-wide accessor for the tracked team's document.
///
/// Configuration is read from the environment on first use.
pub fn get_team_data() -> Option<Arc<TeamData>> {
    TEAM_CACHE.get_team_data()
}
