use std::sync::mpsc;

use matchday_terminal::controller::Controller;
use matchday_terminal::state::{
    Competition, Delta, DetailsRequest, FetchCommand, Fixture, MatchDetails, Payload, TeamRef,
    View,
};

fn competition(id: &str, name: &str, emblem: Option<&str>) -> Competition {
    Competition {
        id: id.to_string(),
        name: name.to_string(),
        country: "England".to_string(),
        emblem: emblem.map(str::to_string),
    }
}

fn team(id: &str, name: &str) -> TeamRef {
    TeamRef {
        id: id.to_string(),
        name: name.to_string(),
        short_name: name.to_string(),
        crest: format!("https://crests.example.com/{id}.png"),
    }
}

fn fixture(id: &str, utc_date: &str, home: &str, away: &str) -> Fixture {
    Fixture {
        id: id.to_string(),
        utc_date: utc_date.to_string(),
        home: team("1", home),
        away: team("2", away),
    }
}

fn controller() -> (Controller, mpsc::Receiver<FetchCommand>) {
    let (tx, rx) = mpsc::channel();
    let mut controller = Controller::new(Some(tx));
    controller.details_by_teams = false;
    (controller, rx)
}

/// Pulls the single command the last navigation dispatched.
fn take_command(rx: &mpsc::Receiver<FetchCommand>) -> FetchCommand {
    rx.try_recv().expect("a fetch command should be queued")
}

fn answer(controller: &mut Controller, cmd: &FetchCommand, payload: Payload) {
    controller.apply(Delta::Loaded {
        ticket: cmd.ticket(),
        payload,
    });
}

/// Walks the controller to the fixtures view of competition 2021.
fn enter_fixtures(controller: &mut Controller, rx: &mpsc::Receiver<FetchCommand>) {
    controller.initialize();
    let cmd = take_command(rx);
    answer(
        controller,
        &cmd,
        Payload::Competitions(vec![competition(
            "2021",
            "Premier League",
            Some("https://crests.example.com/pl.png"),
        )]),
    );

    controller.select_competition();
    let cmd = take_command(rx);
    assert!(matches!(
        &cmd,
        FetchCommand::Fixtures { competition_id, .. } if competition_id == "2021"
    ));
    answer(
        controller,
        &cmd,
        Payload::Fixtures(vec![
            fixture("901", "2024-05-01T15:30:00Z", "Arsenal", "Chelsea"),
            fixture("902", "2024-05-01T19:45:00Z", "Liverpool", "Man City"),
        ]),
    );
}

#[test]
fn initialize_loads_competitions() {
    let (mut controller, rx) = controller();
    controller.initialize();

    assert_eq!(controller.state.view, View::Competitions);
    assert!(controller.state.is_loading());

    let cmd = take_command(&rx);
    assert!(matches!(cmd, FetchCommand::Competitions { .. }));
    answer(
        &mut controller,
        &cmd,
        Payload::Competitions(vec![competition("2021", "Premier League", Some("e.png"))]),
    );

    assert!(!controller.state.is_loading());
    assert_eq!(controller.state.competitions.len(), 1);
    assert!(controller.state.error.is_none());
}

#[test]
fn select_competition_resolves_cursor_against_visible_list() {
    let (mut controller, rx) = controller();
    controller.initialize();
    let cmd = take_command(&rx);
    // The first entry has no emblem, so the cursor's first row is La Liga.
    answer(
        &mut controller,
        &cmd,
        Payload::Competitions(vec![
            competition("2016", "Championship", None),
            competition("2014", "La Liga", Some("pd.png")),
        ]),
    );

    controller.select_competition();
    assert_eq!(controller.state.view, View::Fixtures);
    assert_eq!(controller.state.current_competition_id.as_deref(), Some("2014"));
    assert_eq!(
        controller.state.current_competition_name.as_deref(),
        Some("La Liga")
    );
    let cmd = take_command(&rx);
    assert!(matches!(
        cmd,
        FetchCommand::Fixtures { competition_id, .. } if competition_id == "2014"
    ));
}

#[test]
fn select_fixture_captures_match_card() {
    let (mut controller, rx) = controller();
    enter_fixtures(&mut controller, &rx);

    controller.state.select_next();
    controller.select_fixture();

    assert_eq!(controller.state.view, View::Details);
    let card = controller
        .state
        .current_match
        .as_ref()
        .expect("selecting a fixture should capture a match card");
    assert_eq!(card.fixture_id, "902");
    assert_eq!(card.home_name, "Liverpool");
    assert_eq!(card.away_name, "Man City");
    assert!(card.home_crest.contains("crests.example.com"));

    let cmd = take_command(&rx);
    assert!(matches!(
        cmd,
        FetchCommand::Details {
            request: DetailsRequest::ByFixture { fixture_id },
            ..
        } if fixture_id == "902"
    ));
}

#[test]
fn details_lookup_by_teams_sends_both_team_ids() {
    let (mut controller, rx) = controller();
    enter_fixtures(&mut controller, &rx);
    controller.details_by_teams = true;

    controller.select_fixture();
    let cmd = take_command(&rx);
    assert!(matches!(
        cmd,
        FetchCommand::Details {
            request: DetailsRequest::ByTeams { home_id, away_id },
            ..
        } if home_id == "1" && away_id == "2"
    ));
}

#[test]
fn back_from_details_refetches_same_competition() {
    let (mut controller, rx) = controller();
    enter_fixtures(&mut controller, &rx);

    controller.select_fixture();
    let cmd = take_command(&rx);
    answer(
        &mut controller,
        &cmd,
        Payload::Details(MatchDetails {
            prediction: "Home win".to_string(),
            news: Vec::new(),
        }),
    );
    assert!(controller.state.details.is_some());

    controller.go_back();
    assert_eq!(controller.state.view, View::Fixtures);
    assert!(controller.state.current_match.is_none());
    assert!(controller.state.details.is_none());
    let cmd = take_command(&rx);
    assert!(matches!(
        cmd,
        FetchCommand::Fixtures { competition_id, .. } if competition_id == "2021"
    ));
}

#[test]
fn backing_out_twice_resets_to_root() {
    let (mut controller, rx) = controller();
    enter_fixtures(&mut controller, &rx);

    controller.select_fixture();
    let cmd = take_command(&rx);
    answer(
        &mut controller,
        &cmd,
        Payload::Details(MatchDetails::default()),
    );

    controller.go_back();
    let _ = take_command(&rx);
    controller.go_back();

    assert_eq!(controller.state.view, View::Competitions);
    assert!(controller.state.current_competition_id.is_none());
    assert!(controller.state.current_competition_name.is_none());
    assert!(controller.state.current_match.is_none());
    assert!(controller.state.details.is_none());
    assert!(controller.state.fixtures.is_empty());
    let cmd = take_command(&rx);
    assert!(matches!(cmd, FetchCommand::Competitions { .. }));
}

#[test]
fn back_from_root_is_a_no_op() {
    let (mut controller, rx) = controller();
    controller.initialize();
    let cmd = take_command(&rx);
    answer(
        &mut controller,
        &cmd,
        Payload::Competitions(vec![competition("2021", "Premier League", Some("e.png"))]),
    );

    controller.go_back();
    assert_eq!(controller.state.view, View::Competitions);
    assert!(rx.try_recv().is_err(), "no fetch should be dispatched");
}

#[test]
fn fetch_failure_keeps_view_and_hides_loader() {
    let (mut controller, rx) = controller();
    enter_fixtures(&mut controller, &rx);

    controller.select_fixture();
    let cmd = take_command(&rx);
    controller.apply(Delta::Failed {
        ticket: cmd.ticket(),
        message: "details request failed: server unavailable".to_string(),
    });

    assert_eq!(controller.state.view, View::Details);
    assert!(!controller.state.is_loading());
    let error = controller
        .state
        .error
        .as_deref()
        .expect("the failure should surface an error message");
    assert!(error.contains("server unavailable"));
    // The remembered competition survives, so backing out still works.
    assert_eq!(controller.state.current_competition_id.as_deref(), Some("2021"));
}

#[test]
fn stale_response_is_dropped_after_new_navigation() {
    let (mut controller, rx) = controller();
    controller.initialize();
    let first = take_command(&rx);

    // Navigate again before the first request resolves.
    controller.refresh();
    let second = take_command(&rx);
    assert_ne!(first.ticket(), second.ticket());

    answer(
        &mut controller,
        &first,
        Payload::Competitions(vec![competition("9999", "Stale League", Some("s.png"))]),
    );
    assert!(
        controller.state.competitions.is_empty(),
        "a superseded response should not render"
    );
    assert!(controller.state.is_loading(), "the newer request is still pending");

    answer(
        &mut controller,
        &second,
        Payload::Competitions(vec![competition("2021", "Premier League", Some("e.png"))]),
    );
    assert_eq!(controller.state.competitions.len(), 1);
    assert_eq!(controller.state.competitions[0].id, "2021");
    assert!(!controller.state.is_loading());
}

#[test]
fn stale_failure_is_dropped_after_new_navigation() {
    let (mut controller, rx) = controller();
    controller.initialize();
    let first = take_command(&rx);
    controller.refresh();
    let second = take_command(&rx);

    controller.apply(Delta::Failed {
        ticket: first.ticket(),
        message: "request failed".to_string(),
    });
    assert!(controller.state.error.is_none());
    assert!(controller.state.is_loading());

    answer(
        &mut controller,
        &second,
        Payload::Competitions(Vec::new()),
    );
    assert!(!controller.state.is_loading());
}

#[test]
fn new_navigation_clears_previous_error() {
    let (mut controller, rx) = controller();
    controller.initialize();
    let cmd = take_command(&rx);
    controller.apply(Delta::Failed {
        ticket: cmd.ticket(),
        message: "HTTP error! status: 500".to_string(),
    });
    assert!(controller.state.error.is_some());

    controller.refresh();
    assert!(controller.state.error.is_none());
    assert!(controller.state.is_loading());
}
