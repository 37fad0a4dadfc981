use amazonas::moves::{legal_moves, validate};
use amazonas::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn occupied(board: &Board) -> usize {
    board.cells().filter(|&(_, cell)| cell != Cell::Empty).count()
}

// Joga lances aleatórios alternando os lados e devolve-os por ordem.
fn random_walk(board: &mut Board, rng: &mut StdRng, plies: usize) -> Vec<Move> {
    let mut played = Vec::new();
    let mut role = Role::White;
    for _ in 0..plies {
        let moves = legal_moves(board, role);
        let Some(mv) = moves.choose(rng) else { break };
        board.apply(mv);
        played.push(*mv);
        role = role.other();
    }
    played
}

#[test]
fn test_random_walk_undo_restores_start() {
    for seed in 0..8 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = Board::new();
        let played = random_walk(&mut board, &mut rng, 40);
        assert_eq!(board.marked_positions() as usize, played.len());

        for mv in played.iter().rev() {
            board.undo(mv);
        }
        assert_eq!(board, Board::new(), "seed {}", seed);
    }
}

#[test]
fn test_each_apply_marks_exactly_one_more_cell() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut board = Board::new();
    let mut role = Role::White;
    for _ in 0..30 {
        let moves = legal_moves(&board, role);
        let Some(mv) = moves.choose(&mut rng) else { break };
        let before = occupied(&board);
        board.apply(mv);
        assert_eq!(occupied(&board), before + 1);
        role = role.other();
    }
}

#[test]
fn test_generated_moves_are_valid() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut board = Board::new();
    random_walk(&mut board, &mut rng, 20);

    for role in [Role::White, Role::Black] {
        for mv in legal_moves(&board, role) {
            assert_eq!(validate(&board, &mv), Ok(()), "{}", mv);
        }
    }
}

#[test]
fn test_known_opening_move() {
    let mut board = Board::new();
    let mv = Move::parse(Role::White, "a3-a4/a5").unwrap();
    assert_eq!(mv, Move::new(Role::White, Square::new(3, 0), Square::new(4, 0), Square::new(5, 0)));
    assert_eq!(validate(&board, &mv), Ok(()));

    board.apply(&mv);
    assert_eq!(board.mark_at(Square::new(3, 0)), Cell::Empty);
    assert_eq!(board.mark_at(Square::new(4, 0)), Cell::WhiteQueen);
    assert_eq!(board.mark_at(Square::new(5, 0)), Cell::Arrow);
    assert!(board.queen_at(Role::White, Square::new(4, 0)));
    assert_eq!(board.marked_positions(), 1);

    board.undo(&mv);
    assert_eq!(board, Board::new());
}

#[test]
fn test_diagram_round_trip_after_play() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut board = Board::new();
    random_walk(&mut board, &mut rng, 12);

    let parsed = Board::from_diagram(&board.to_string()).unwrap();
    assert_eq!(parsed.marked_positions(), board.marked_positions());
    for role in [Role::White, Role::Black] {
        for &queen in board.queens(role) {
            assert!(parsed.queen_at(role, queen));
        }
    }
    assert!(parsed.cells().eq(board.cells()));
}

#[test]
fn test_start_position_is_not_enclosed() {
    assert!(!Board::new().is_enclosed());
}
