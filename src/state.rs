use std::collections::VecDeque;

/// The three mutually exclusive views the client can present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Competitions,
    Fixtures,
    Details,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Competition {
    pub id: String,
    pub name: String,
    pub country: String,
    pub emblem: Option<String>,
}

impl Competition {
    pub fn has_emblem(&self) -> bool {
        self.emblem.as_deref().is_some_and(|url| !url.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRef {
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub crest: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub id: String,
    pub utc_date: String,
    pub home: TeamRef,
    pub away: TeamRef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchDetails {
    pub prediction: String,
    pub news: Vec<NewsItem>,
}

/// Snapshot of the selected fixture carried into the details view, so the
/// header can render before (and regardless of whether) the details request
/// resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCard {
    pub fixture_id: String,
    pub home_team_id: String,
    pub away_team_id: String,
    pub home_name: String,
    pub away_name: String,
    pub home_crest: String,
    pub away_crest: String,
}

impl MatchCard {
    pub fn from_fixture(fixture: &Fixture) -> Self {
        Self {
            fixture_id: fixture.id.clone(),
            home_team_id: fixture.home.id.clone(),
            away_team_id: fixture.away.id.clone(),
            home_name: fixture.home.name.clone(),
            away_name: fixture.away.name.clone(),
            home_crest: fixture.home.crest.clone(),
            away_crest: fixture.away.crest.clone(),
        }
    }
}

/// Which query shape the details endpoint is asked with. Most backend
/// revisions look a match up by fixture id; one expects the team-id pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailsRequest {
    ByFixture { fixture_id: String },
    ByTeams { home_id: String, away_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchCommand {
    Competitions {
        ticket: u64,
    },
    Fixtures {
        ticket: u64,
        competition_id: String,
    },
    Details {
        ticket: u64,
        request: DetailsRequest,
    },
}

impl FetchCommand {
    pub fn ticket(&self) -> u64 {
        match self {
            FetchCommand::Competitions { ticket }
            | FetchCommand::Fixtures { ticket, .. }
            | FetchCommand::Details { ticket, .. } => *ticket,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Competitions(Vec<Competition>),
    Fixtures(Vec<Fixture>),
    Details(MatchDetails),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delta {
    Loaded { ticket: u64, payload: Payload },
    Failed { ticket: u64, message: String },
    Log(String),
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub view: View,
    pub current_competition_id: Option<String>,
    pub current_competition_name: Option<String>,
    pub current_match: Option<MatchCard>,
    pub competitions: Vec<Competition>,
    pub fixtures: Vec<Fixture>,
    pub details: Option<MatchDetails>,
    pub selected: usize,
    /// Ticket of the request currently in flight; `Some` shows the loader.
    pub pending: Option<u64>,
    pub error: Option<String>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            view: View::Competitions,
            current_competition_id: None,
            current_competition_name: None,
            current_match: None,
            competitions: Vec::new(),
            fixtures: Vec::new(),
            details: None,
            selected: 0,
            pending: None,
            error: None,
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
        }
    }

    /// Competitions eligible for rendering. Entries without an emblem are
    /// never shown, so the cursor also moves over this filtered list.
    pub fn visible_competitions(&self) -> Vec<&Competition> {
        self.competitions.iter().filter(|c| c.has_emblem()).collect()
    }

    pub fn selected_competition(&self) -> Option<&Competition> {
        if self.view != View::Competitions {
            return None;
        }
        self.visible_competitions().get(self.selected).copied()
    }

    pub fn selected_fixture(&self) -> Option<&Fixture> {
        if self.view != View::Fixtures {
            return None;
        }
        self.fixtures.get(self.selected)
    }

    fn cursor_len(&self) -> usize {
        match self.view {
            View::Competitions => self.visible_competitions().len(),
            View::Fixtures => self.fixtures.len(),
            View::Details => 0,
        }
    }

    pub fn select_next(&mut self) {
        let total = self.cursor_len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1) % total;
    }

    pub fn select_prev(&mut self) {
        let total = self.cursor_len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        if self.selected == 0 {
            self.selected = total - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn last_log(&self) -> Option<&str> {
        self.logs.back().map(String::as_str)
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}

/// Folds a provider delta into the state. Responses carry the ticket of the
/// navigation that requested them; anything not matching the current
/// `pending` ticket belongs to a superseded navigation and is discarded
/// without touching the view data.
pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::Log(line) => state.push_log(line),
        Delta::Loaded { ticket, payload } => {
            if state.pending != Some(ticket) {
                state.push_log(format!("[INFO] Dropped stale response (ticket {ticket})"));
                return;
            }
            state.pending = None;
            state.error = None;
            match payload {
                Payload::Competitions(competitions) => {
                    state.competitions = competitions;
                    let total = state.visible_competitions().len();
                    state.selected = state.selected.min(total.saturating_sub(1));
                }
                Payload::Fixtures(fixtures) => {
                    state.fixtures = fixtures;
                    state.selected = state.selected.min(state.fixtures.len().saturating_sub(1));
                }
                Payload::Details(details) => {
                    state.details = Some(details);
                }
            }
        }
        Delta::Failed { ticket, message } => {
            if state.pending != Some(ticket) {
                state.push_log(format!("[INFO] Dropped stale failure (ticket {ticket})"));
                return;
            }
            state.pending = None;
            state.push_log(format!("[WARN] Fetch failed: {message}"));
            state.error = Some(message);
        }
    }
}
