use matchday_terminal::state::{
    AppState, Delta, Fixture, Payload, TeamRef, View, apply_delta,
};

fn fixture(id: &str) -> Fixture {
    let team = |tid: &str| TeamRef {
        id: tid.to_string(),
        name: format!("Team {tid}"),
        short_name: format!("T{tid}"),
        crest: String::new(),
    };
    Fixture {
        id: id.to_string(),
        utc_date: "2024-05-01T15:30:00Z".to_string(),
        home: team("1"),
        away: team("2"),
    }
}

#[test]
fn loading_fixtures_clamps_the_cursor() {
    let mut state = AppState::new();
    state.view = View::Fixtures;
    state.selected = 5;
    state.pending = Some(7);

    apply_delta(
        &mut state,
        Delta::Loaded {
            ticket: 7,
            payload: Payload::Fixtures(vec![fixture("a"), fixture("b")]),
        },
    );

    assert_eq!(state.fixtures.len(), 2);
    assert_eq!(state.selected, 1);
    assert!(state.pending.is_none());
}

#[test]
fn loading_an_empty_list_parks_the_cursor_at_zero() {
    let mut state = AppState::new();
    state.view = View::Fixtures;
    state.selected = 3;
    state.pending = Some(1);

    apply_delta(
        &mut state,
        Delta::Loaded {
            ticket: 1,
            payload: Payload::Fixtures(Vec::new()),
        },
    );

    assert!(state.fixtures.is_empty());
    assert_eq!(state.selected, 0);
}

#[test]
fn log_deltas_land_in_the_ring() {
    let mut state = AppState::new();
    apply_delta(&mut state, Delta::Log("[INFO] hello".to_string()));
    assert_eq!(state.last_log(), Some("[INFO] hello"));
}

#[test]
fn log_ring_is_bounded() {
    let mut state = AppState::new();
    for i in 0..250 {
        state.push_log(format!("line {i}"));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.last_log(), Some("line 249"));
}
