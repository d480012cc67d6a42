use std::sync::mpsc::Sender;

use crate::api;
use crate::state::{
    AppState, Delta, DetailsRequest, FetchCommand, MatchCard, View, apply_delta,
};

/// The view controller. Owns the navigation state, mints a fresh ticket for
/// every dispatched request, and folds ticket-tagged provider deltas back in.
/// A navigation issued while a request is pending supersedes it: the old
/// ticket stops matching and its eventual response is dropped.
pub struct Controller {
    pub state: AppState,
    cmd_tx: Option<Sender<FetchCommand>>,
    pub details_by_teams: bool,
    next_ticket: u64,
}

impl Controller {
    pub fn new(cmd_tx: Option<Sender<FetchCommand>>) -> Self {
        Self {
            state: AppState::new(),
            cmd_tx,
            details_by_teams: api::details_by_teams(),
            next_ticket: 0,
        }
    }

    pub fn apply(&mut self, delta: Delta) {
        apply_delta(&mut self.state, delta);
    }

    /// Entry point and the landing spot when backing out past the fixture
    /// list: reset to the competitions view and request the list.
    pub fn initialize(&mut self) {
        self.state.view = View::Competitions;
        self.state.current_competition_id = None;
        self.state.current_competition_name = None;
        self.state.current_match = None;
        self.state.fixtures.clear();
        self.state.details = None;
        self.state.selected = 0;
        self.dispatch(|ticket| FetchCommand::Competitions { ticket });
    }

    pub fn select_competition(&mut self) {
        let Some(comp) = self.state.selected_competition() else {
            return;
        };
        let id = comp.id.clone();
        let name = comp.name.clone();
        self.state.view = View::Fixtures;
        self.state.current_competition_id = Some(id.clone());
        self.state.current_competition_name = Some(name);
        self.state.fixtures.clear();
        self.state.selected = 0;
        self.dispatch(|ticket| FetchCommand::Fixtures {
            ticket,
            competition_id: id,
        });
    }

    pub fn select_fixture(&mut self) {
        let Some(fixture) = self.state.selected_fixture() else {
            return;
        };
        let card = MatchCard::from_fixture(fixture);
        let request = self.details_request(&card);
        self.state.view = View::Details;
        self.state.details = None;
        self.state.current_match = Some(card);
        self.dispatch(|ticket| FetchCommand::Details { ticket, request });
    }

    pub fn go_back(&mut self) {
        match self.state.view {
            View::Details => {
                self.state.view = View::Fixtures;
                self.state.current_match = None;
                self.state.details = None;
                self.state.selected = 0;
                let Some(id) = self.state.current_competition_id.clone() else {
                    // No competition to return to; fall back to the root.
                    self.initialize();
                    return;
                };
                self.dispatch(|ticket| FetchCommand::Fixtures {
                    ticket,
                    competition_id: id,
                });
            }
            View::Fixtures => self.initialize(),
            View::Competitions => {}
        }
    }

    /// Re-request whatever the current view shows.
    pub fn refresh(&mut self) {
        match self.state.view {
            View::Competitions => {
                self.dispatch(|ticket| FetchCommand::Competitions { ticket });
            }
            View::Fixtures => {
                let Some(id) = self.state.current_competition_id.clone() else {
                    return;
                };
                self.dispatch(|ticket| FetchCommand::Fixtures {
                    ticket,
                    competition_id: id,
                });
            }
            View::Details => {
                let Some(card) = self.state.current_match.clone() else {
                    return;
                };
                let request = self.details_request(&card);
                self.dispatch(|ticket| FetchCommand::Details { ticket, request });
            }
        }
    }

    fn details_request(&self, card: &MatchCard) -> DetailsRequest {
        if self.details_by_teams {
            DetailsRequest::ByTeams {
                home_id: card.home_team_id.clone(),
                away_id: card.away_team_id.clone(),
            }
        } else {
            DetailsRequest::ByFixture {
                fixture_id: card.fixture_id.clone(),
            }
        }
    }

    fn dispatch(&mut self, make: impl FnOnce(u64) -> FetchCommand) {
        let Some(tx) = &self.cmd_tx else {
            self.state.pending = None;
            self.state.push_log("[INFO] Fetch unavailable (no provider)");
            return;
        };
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        if tx.send(make(ticket)).is_err() {
            self.state.pending = None;
            self.state.push_log("[WARN] Fetch request failed to send");
            return;
        }
        self.state.pending = Some(ticket);
        self.state.error = None;
    }
}
