use std::env;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use crate::http_client::http_client;
use crate::state::{Competition, DetailsRequest, Fixture, MatchDetails, NewsItem, TeamRef};

const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";

pub fn api_base() -> String {
    env::var("MATCHDAY_API_BASE")
        .ok()
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

/// Which query shape `/api/details` is asked with, selectable via
/// `MATCHDAY_DETAILS_LOOKUP` (`fixture` or `teams`).
pub fn details_by_teams() -> bool {
    env::var("MATCHDAY_DETAILS_LOOKUP")
        .map(|v| v.trim().eq_ignore_ascii_case("teams"))
        .unwrap_or(false)
}

pub fn fetch_competitions() -> Result<Vec<Competition>> {
    let url = format!("{}/api/competitions", api_base());
    let body = fetch_json(&url).context("competitions request failed")?;
    parse_competitions_json(&body)
}

pub fn fetch_fixtures(competition_id: &str) -> Result<Vec<Fixture>> {
    let url = format!("{}/api/fixtures?id={competition_id}", api_base());
    let body = fetch_json(&url).context("fixtures request failed")?;
    parse_fixtures_json(&body)
}

pub fn fetch_match_details(request: &DetailsRequest) -> Result<MatchDetails> {
    let url = match request {
        DetailsRequest::ByFixture { fixture_id } => {
            format!("{}/api/details?id={fixture_id}", api_base())
        }
        DetailsRequest::ByTeams { home_id, away_id } => {
            format!("{}/api/details?home_id={home_id}&away_id={away_id}", api_base())
        }
    };
    let body = fetch_json(&url).context("details request failed")?;
    parse_details_json(&body)
}

fn fetch_json(url: &str) -> Result<String> {
    let client = http_client()?;
    let resp = client.get(url).send().context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("{}", error_message(status, &body)));
    }
    Ok(body)
}

/// Non-2xx responses are expected to carry `{"error": "..."}`; surface that
/// text when present, otherwise a generic status message.
pub fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(body)
        && let Some(err) = v.get("error").and_then(|e| e.as_str())
        && !err.trim().is_empty()
    {
        return err.trim().to_string();
    }
    format!("HTTP error! status: {}", status.as_u16())
}

#[derive(Debug, Deserialize)]
struct ApiCompetition {
    id: u64,
    name: String,
    #[serde(default)]
    area: Option<ApiArea>,
    #[serde(default)]
    emblem: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiArea {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ApiFixture {
    id: u64,
    #[serde(rename = "utcDate")]
    utc_date: String,
    #[serde(rename = "homeTeam")]
    home: ApiTeam,
    #[serde(rename = "awayTeam")]
    away: ApiTeam,
}

#[derive(Debug, Deserialize)]
struct ApiTeam {
    id: u64,
    name: String,
    #[serde(rename = "shortName")]
    short_name: Option<String>,
    #[serde(default)]
    crest: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiDetails {
    #[serde(default)]
    prediction: String,
    #[serde(default, alias = "newsSummary")]
    news: Vec<ApiNewsItem>,
}

#[derive(Debug, Deserialize)]
struct ApiNewsItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
}

pub fn parse_competitions_json(raw: &str) -> Result<Vec<Competition>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let rows: Vec<ApiCompetition> =
        serde_json::from_str(trimmed).context("invalid competitions json")?;
    Ok(rows
        .into_iter()
        .map(|c| Competition {
            id: c.id.to_string(),
            name: c.name,
            country: c.area.map(|a| a.name).unwrap_or_default(),
            emblem: c.emblem,
        })
        .collect())
}

pub fn parse_fixtures_json(raw: &str) -> Result<Vec<Fixture>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let rows: Vec<ApiFixture> = serde_json::from_str(trimmed).context("invalid fixtures json")?;
    Ok(rows
        .into_iter()
        .map(|f| Fixture {
            id: f.id.to_string(),
            utc_date: f.utc_date,
            home: team_ref(f.home),
            away: team_ref(f.away),
        })
        .collect())
}

pub fn parse_details_json(raw: &str) -> Result<MatchDetails> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(MatchDetails::default());
    }
    let details: ApiDetails = serde_json::from_str(trimmed).context("invalid details json")?;
    Ok(MatchDetails {
        prediction: details.prediction,
        news: details
            .news
            .into_iter()
            .filter(|n| !n.title.trim().is_empty())
            .map(|n| NewsItem {
                title: n.title,
                url: n.url,
            })
            .collect(),
    })
}

fn team_ref(team: ApiTeam) -> TeamRef {
    let short_name = team
        .short_name
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| team.name.clone());
    TeamRef {
        id: team.id.to_string(),
        name: team.name,
        short_name,
        crest: team.crest.unwrap_or_default(),
    }
}
