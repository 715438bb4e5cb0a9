//! Whole-game scenarios driven through the public API.

use dots_and_boxes::ai::{Agent, HeuristicAgent, RandomAgent};
use dots_and_boxes::config::FirstPlayer;
use dots_and_boxes::game::{Board, CellPos, EdgeId, GameOutcome, GameState, Player, Side};
use dots_and_boxes::session::{Driver, DriverSettings, Phase, TurnEvent};

fn settings(delay: u32) -> DriverSettings {
    DriverSettings {
        grid_size: 3,
        first_player: FirstPlayer::Human,
        opponent_delay_ticks: delay,
        end_delay_ticks: 2,
    }
}

fn state_edge(size: usize, row: usize, col: usize, side: Side) -> EdgeId {
    Board::new(size).edge_at(row, col, side).unwrap()
}

fn assert_scores_match_ownership(state: &GameState) {
    let board = state.board();
    assert_eq!(state.score_human(), board.owned_cell_count(Player::Human));
    assert_eq!(state.score_computer(), board.owned_cell_count(Player::Computer));
}

#[test]
fn test_human_completes_corner_cell() {
    let mut state = GameState::new(3, Player::Human);
    let corner = |side| state_edge(3, 0, 0, side);
    let far = |side| state_edge(3, 2, 2, side);

    // Human draws three sides of (0,0); the computer answers in the far corner.
    for (mine, theirs) in [
        (corner(Side::Left), far(Side::Bottom)),
        (corner(Side::Top), far(Side::Top)),
        (corner(Side::Right), far(Side::Left)),
    ] {
        let result = state.claim_edge(mine).unwrap();
        assert!(!result.completed_any());
        state.pass_turn();
        assert_eq!(state.current_player(), Player::Computer);

        let result = state.claim_edge(theirs).unwrap();
        assert!(!result.completed_any());
        state.pass_turn();
        assert_eq!(state.current_player(), Player::Human);
    }

    let result = state.claim_edge(corner(Side::Bottom)).unwrap();
    assert_eq!(result.completed, vec![CellPos { row: 0, col: 0 }]);
    assert_eq!(result.player, Player::Human);

    let cell = state.board().cell_at(0, 0).unwrap();
    assert_eq!(cell.owner(), Some(Player::Human));
    assert_eq!(cell.selected_count(), 4);
    assert_eq!(state.score_human(), 1);
    assert_eq!(state.score_computer(), 0);
    assert_eq!(state.current_player(), Player::Human);
    assert_scores_match_ownership(&state);
}

#[test]
fn test_computer_takes_offered_cell_and_moves_again() {
    let mut driver = Driver::new(settings(0), Box::new(HeuristicAgent::with_seed(4)), Some(4));
    assert_eq!(driver.phase(), Phase::HumanTurn);

    let offered = [
        state_edge(3, 0, 0, Side::Top),
        state_edge(3, 0, 0, Side::Left),
        state_edge(3, 0, 0, Side::Right),
    ];
    let event = driver.human_claim_all(&offered).unwrap();
    assert!(matches!(
        event,
        TurnEvent::Claimed { phase: Phase::ComputerTurn, .. }
    ));

    match driver.tick().unwrap() {
        TurnEvent::Claimed { claims, phase } => {
            assert_eq!(claims.len(), 1);
            assert_eq!(claims[0].edge, state_edge(3, 0, 0, Side::Bottom));
            assert_eq!(claims[0].completed, vec![CellPos { row: 0, col: 0 }]);
            assert_eq!(phase, Phase::ComputerTurn);
        }
        other => panic!("expected a claim, got {other:?}"),
    }

    let state = driver.state();
    assert_eq!(
        state.board().cell_at(0, 0).unwrap().owner(),
        Some(Player::Computer)
    );
    assert_eq!(state.score_computer(), 1);
    assert_scores_match_ownership(state);
}

#[test]
fn test_full_game_through_driver() {
    let mut driver = Driver::new(settings(2), Box::new(HeuristicAgent::with_seed(11)), Some(3));
    let mut human = RandomAgent::with_seed(12);
    let mut steps = 0;

    while driver.phase() != Phase::GameOver {
        steps += 1;
        assert!(steps < 1_000, "game did not finish");

        match driver.phase() {
            Phase::HumanTurn => {
                let edge = human.select_edge(driver.state().board()).unwrap();
                let event = driver.human_claim(edge).unwrap();
                assert!(matches!(event, TurnEvent::Claimed { .. }));
            }
            Phase::ComputerTurn => {
                driver.tick().unwrap();
            }
            Phase::GameOver => unreachable!(),
        }
        assert_scores_match_ownership(driver.state());
    }

    let state = driver.state();
    assert!(state.board().is_full());
    assert_eq!(state.score_human() + state.score_computer(), 9);
    assert_eq!(state.board().claimed_edge_count(), 24);
    assert_eq!(driver.end_ticks_left(), 2);

    let expected = match state.score_human().cmp(&state.score_computer()) {
        std::cmp::Ordering::Greater => GameOutcome::Winner(Player::Human),
        std::cmp::Ordering::Less => GameOutcome::Winner(Player::Computer),
        std::cmp::Ordering::Equal => GameOutcome::Tie,
    };
    assert_eq!(state.outcome(), Some(expected));

    // Input after the end is dropped.
    assert_eq!(
        driver.human_claim(state_edge(3, 1, 1, Side::Top)).unwrap(),
        TurnEvent::Ignored
    );
}

#[test]
fn test_shared_edge_counts_for_both_cells() {
    let mut board = Board::new(3);
    let shared = board.edge_at(1, 1, Side::Right).unwrap();
    assert_eq!(board.edge_at(1, 2, Side::Left).unwrap(), shared);
    assert_eq!(board.edge(shared).unwrap().cells().count(), 2);

    board.claim_edge(shared, Player::Human).unwrap();
    assert_eq!(board.cell_at(1, 1).unwrap().selected_count(), 1);
    assert_eq!(board.cell_at(1, 2).unwrap().selected_count(), 1);
    assert!(board.claim_edge(shared, Player::Computer).is_err());

    let total: usize = board
        .cells()
        .iter()
        .map(|c| usize::from(c.selected_count()))
        .sum();
    assert_eq!(total, 2);
}
