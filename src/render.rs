use chrono::NaiveDate;

use crate::state::{AppState, Fixture, MatchDetails, View};

pub const EMPTY_FIXTURES_MESSAGE: &str = "No scheduled fixtures found for the next 3 days.";
pub const EMPTY_NEWS_MESSAGE: &str = "No recent news found.";
pub const EMPTY_COMPETITIONS_MESSAGE: &str = "No competitions available.";

/// One rendered competition card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetitionRow {
    pub name: String,
    pub country: String,
    pub emblem: String,
}

/// One rendered fixture card. `index` is the fixture's position in the flat
/// list, which is what the cursor moves over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureRow {
    pub index: usize,
    pub time: String,
    pub home_name: String,
    pub home_crest: String,
    pub away_name: String,
    pub away_crest: String,
}

/// Fixtures for one calendar day, in response order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureDay {
    pub date_label: String,
    pub rows: Vec<FixtureRow>,
}

pub fn competition_rows(state: &AppState) -> Vec<CompetitionRow> {
    state
        .visible_competitions()
        .into_iter()
        .map(|c| CompetitionRow {
            name: c.name.clone(),
            country: c.country.clone(),
            emblem: c.emblem.clone().unwrap_or_default(),
        })
        .collect()
}

/// Groups fixtures by the date part of `utcDate`, preserving response order
/// within and across days.
pub fn fixture_days(fixtures: &[Fixture]) -> Vec<FixtureDay> {
    let mut days: Vec<(String, FixtureDay)> = Vec::new();
    for (index, fixture) in fixtures.iter().enumerate() {
        let date = match_date(&fixture.utc_date);
        let row = FixtureRow {
            index,
            time: kickoff_time(&fixture.utc_date),
            home_name: fixture.home.short_name.clone(),
            home_crest: fixture.home.crest.clone(),
            away_name: fixture.away.short_name.clone(),
            away_crest: fixture.away.crest.clone(),
        };
        if let Some((_, day)) = days.iter_mut().find(|(key, _)| *key == date) {
            day.rows.push(row);
        } else {
            days.push((
                date.clone(),
                FixtureDay {
                    date_label: date_label(&date),
                    rows: vec![row],
                },
            ));
        }
    }
    days.into_iter().map(|(_, day)| day).collect()
}

/// `"2024-05-01T15:30:00Z"` → `"15:30"`.
pub fn kickoff_time(utc_date: &str) -> String {
    utc_date
        .split('T')
        .nth(1)
        .map(|t| t.chars().take(5).collect())
        .unwrap_or_default()
}

/// The date part of `utcDate`, `"2024-05-01T15:30:00Z"` → `"2024-05-01"`.
pub fn match_date(utc_date: &str) -> String {
    utc_date.split('T').next().unwrap_or_default().to_string()
}

/// `"2024-05-01"` → `"Wed 01 May"`; falls through to the raw date when it
/// doesn't parse.
pub fn date_label(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%a %d %b").to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// `"Home FC vs Away FC"` header for the details view, from the fixture
/// snapshot captured at selection time.
pub fn details_header(state: &AppState) -> Option<String> {
    let card = state.current_match.as_ref()?;
    Some(format!("{} vs {}", card.home_name, card.away_name))
}

/// The prediction as plain-text lines. Only the line-break split is applied;
/// backend text is never interpreted as markup.
pub fn prediction_lines(prediction: &str) -> Vec<String> {
    prediction
        .split('\n')
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect()
}

pub fn news_lines(details: &MatchDetails) -> Vec<String> {
    if details.news.is_empty() {
        return vec![EMPTY_NEWS_MESSAGE.to_string()];
    }
    details
        .news
        .iter()
        .map(|item| {
            if item.url.trim().is_empty() {
                item.title.clone()
            } else {
                format!("{} [{}]", item.title, item.url)
            }
        })
        .collect()
}

pub fn subtitle(state: &AppState) -> String {
    match state.view {
        View::Competitions => "Select a competition to see upcoming fixtures.".to_string(),
        View::Fixtures => match state.current_competition_name.as_deref() {
            Some(name) => format!("Fixtures for {name}"),
            None => "Select a fixture to see details and predictions.".to_string(),
        },
        View::Details => "AI-powered match analysis".to_string(),
    }
}

pub fn footer_hints(view: View) -> &'static str {
    match view {
        View::Competitions => "Enter/d Open | j/k/↑/↓ Move | r Refresh | ? Help | q Quit",
        View::Fixtures => "Enter/d Details | b/Esc Back | j/k/↑/↓ Move | r Refresh | ? Help | q Quit",
        View::Details => "b/Esc Back | r Refresh | ? Help | q Quit",
    }
}
