pub mod config;
pub mod http_cache;
pub mod http_client;
pub mod team_data;
pub mod team_fetch;
pub mod team_views;
