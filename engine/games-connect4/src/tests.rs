use super::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Play `columns` alternately starting with Red, returning the last mover.
fn play(board: &mut Board, columns: &[usize]) -> Player {
    let mut player = Player::Red;
    let mut last = player;
    for &column in columns {
        board.apply_move(column, player).unwrap();
        last = player;
        player = player.opponent();
    }
    last
}

/// Red and Yellow alternate in pairs up each column, offset between columns,
/// leaving no line of four anywhere.
fn drawn_board() -> Board {
    let red_first = [
        Player::Red,
        Player::Red,
        Player::Yellow,
        Player::Yellow,
        Player::Red,
        Player::Red,
    ];
    let grid: Vec<Vec<Option<Player>>> = (0..COLS)
        .map(|col| {
            red_first
                .iter()
                .map(|&p| Some(if col % 2 == 0 { p } else { p.opponent() }))
                .collect()
        })
        .collect();
    Board::from_columns(&grid, CONNECT).unwrap()
}

/// Every column is a contiguous run of pieces from row 0.
fn assert_gravity(board: &Board) {
    for column in 1..=board.cols() {
        let height = board.height(column);
        for row in 0..board.rows() {
            assert_eq!(
                board.cell(column, row).is_some(),
                row < height,
                "column {column} row {row} breaks gravity (height {height})"
            );
        }
    }
}

#[test]
fn test_initial_board() {
    let board = Board::new();
    assert_eq!(board.cols(), COLS);
    assert_eq!(board.rows(), ROWS);
    assert_eq!(board.connect(), CONNECT);
    assert_eq!(board.move_count(), 0);
    assert!(board.last_move().is_none());
    assert!(!board.is_full());
    assert!(!board.is_terminal());
    assert_eq!(board.winner(), None);
}

#[test]
fn test_player_encoding() {
    assert_eq!(Player::Red.value(), 1);
    assert_eq!(Player::Yellow.value(), 2);
    for player in [Player::Red, Player::Yellow] {
        assert_eq!(player.opponent().value(), 3 - player.value());
        assert_eq!(Player::from_value(player.value()), Some(player));
        assert_eq!(Player::from_symbol(player.symbol()), Some(player));
    }
    assert_eq!(Player::from_value(0), None);
    assert_eq!(Player::from_symbol('O'), None);
}

#[test]
fn test_legal_moves() {
    let mut board = Board::new();
    assert_eq!(board.legal_moves(), (1..=COLS).collect::<Vec<_>>());

    board.apply_move(4, Player::Red).unwrap();
    assert_eq!(board.legal_moves().len(), COLS);
    assert!(board.legal_moves().contains(&4));
}

#[test]
fn test_fill_legal_moves_reuses_buffer() {
    let mut board = Board::new();
    for _ in 0..ROWS {
        board.apply_move(2, Player::Red).unwrap();
    }

    let mut moves = vec![99, 98, 97, 96, 95, 94, 93, 92, 91];
    board.fill_legal_moves(&mut moves);
    assert_eq!(moves, board.legal_moves());
    assert_eq!(moves, vec![1, 3, 4, 5, 6, 7]);

    for column in [1, 3, 4, 5, 6, 7] {
        for _ in 0..ROWS {
            board.apply_move(column, Player::Yellow).unwrap();
        }
    }
    board.fill_legal_moves(&mut moves);
    assert!(moves.is_empty());
}

#[test]
fn test_apply_move() {
    let mut board = Board::new();
    let row = board.apply_move(4, Player::Red).unwrap();

    assert_eq!(row, 0);
    assert_eq!(board.cell(4, 0), Some(Player::Red));
    assert_eq!(board.height(4), 1);
    assert_eq!(
        board.last_move(),
        Some(LastMove {
            column: 4,
            row: 0,
            player: Player::Red
        })
    );
}

#[test]
fn test_stacking_pieces() {
    let mut board = Board::new();

    for i in 0..ROWS {
        let row = board.apply_move(1, Player::Red).unwrap();
        assert_eq!(row, i);
        assert_eq!(board.height(1), i + 1);
    }

    assert!(!board.is_column_open(1));
    assert!(!board.legal_moves().contains(&1));
}

#[test]
fn test_illegal_moves() {
    let mut board = Board::new();
    for _ in 0..ROWS {
        board.apply_move(1, Player::Yellow).unwrap();
    }
    let before = board.clone();

    assert_eq!(
        board.apply_move(1, Player::Red),
        Err(BoardError::IllegalMove { column: 1, cols: 7 })
    );
    assert_eq!(
        board.apply_move(0, Player::Red),
        Err(BoardError::IllegalMove { column: 0, cols: 7 })
    );
    assert_eq!(
        board.apply_move(8, Player::Red),
        Err(BoardError::IllegalMove { column: 8, cols: 7 })
    );
    assert_eq!(board, before);
}

#[test]
fn test_undo_move() {
    let mut board = Board::new();
    board.apply_move(3, Player::Red).unwrap();
    board.apply_move(3, Player::Yellow).unwrap();

    board.undo_move(3);
    assert_eq!(board.height(3), 1);
    assert_eq!(board.cell(3, 1), None);
    assert_eq!(board.cell(3, 0), Some(Player::Red));
    assert!(board.last_move().is_none());
}

#[test]
fn test_restore_last_move_after_undo() {
    let mut board = Board::new();
    board.apply_move(4, Player::Red).unwrap();
    board.apply_move(3, Player::Yellow).unwrap();
    let before = board.last_move();

    board.apply_move(3, Player::Red).unwrap();
    board.undo_move(3);
    assert!(board.last_move().is_none());

    board.restore_last_move(before);
    assert_eq!(
        board.last_move(),
        Some(LastMove {
            column: 3,
            row: 0,
            player: Player::Yellow
        })
    );
    assert_eq!(board.winner_at_last_move(), None);
}

#[test]
#[should_panic(expected = "undo underflow")]
#[cfg(debug_assertions)]
fn test_undo_empty_column_asserts() {
    let mut board = Board::new();
    board.undo_move(2);
}

#[test]
fn test_horizontal_win() {
    let mut board = Board::new();
    let mover = play(&mut board, &[1, 1, 2, 2, 3, 3, 4]);

    assert_eq!(mover, Player::Red);
    assert_eq!(board.winner_at_last_move(), Some(Player::Red));
    assert_eq!(board.winner(), Some(Outcome::Win(Player::Red)));
    assert!(board.is_terminal());
}

#[test]
fn test_vertical_win() {
    let mut board = Board::new();
    play(&mut board, &[1, 2, 1, 2, 1, 2, 1]);

    assert_eq!(board.winner(), Some(Outcome::Win(Player::Red)));
}

#[test]
fn test_diagonal_win_ascending() {
    // Red at (1,0), (2,1), (3,2), (4,3)
    let mut board = Board::new();
    play(&mut board, &[1, 2, 2, 3, 3, 4, 3, 4, 4, 7, 4]);

    assert_eq!(board.winner(), Some(Outcome::Win(Player::Red)));
}

#[test]
fn test_diagonal_win_descending() {
    // Red at (4,0), (3,1), (2,2), (1,3)
    let mut board = Board::new();
    play(&mut board, &[4, 3, 3, 2, 2, 1, 2, 1, 1, 5, 1]);

    assert_eq!(board.winner(), Some(Outcome::Win(Player::Red)));
}

#[test]
fn test_win_through_middle_of_line() {
    // The last piece fills the gap in R R _ R
    let mut board = Board::new();
    play(&mut board, &[1, 1, 2, 2, 4, 4, 3]);

    assert_eq!(board.last_move().map(|m| m.column), Some(3));
    assert_eq!(board.winner(), Some(Outcome::Win(Player::Red)));
}

#[test]
fn test_no_win_with_three() {
    let mut board = Board::new();
    play(&mut board, &[1, 1, 2, 2, 3]);

    assert_eq!(board.winner_at_last_move(), None);
    assert_eq!(board.scan_winner(), None);
    assert!(!board.is_terminal());
}

#[test]
fn test_draw_board() {
    let board = drawn_board();

    assert!(board.is_full());
    assert!(board.legal_moves().is_empty());
    assert_eq!(board.scan_winner(), None);
    assert_eq!(board.scan_outcome(), Some(Outcome::Draw));
    assert_eq!(board.winner(), Some(Outcome::Draw));
    assert!(board.is_terminal());
}

#[test]
fn test_custom_dimensions() {
    let mut board = Board::with_dimensions(5, 4, 3).unwrap();
    assert_eq!(board.legal_moves(), vec![1, 2, 3, 4, 5]);

    play(&mut board, &[1, 1, 2, 2, 3]);
    assert_eq!(board.winner(), Some(Outcome::Win(Player::Red)));

    assert!(matches!(
        Board::with_dimensions(0, 6, 4),
        Err(BoardError::InvalidDimensions { .. })
    ));
}

#[test]
fn test_from_columns_rejects_floating_piece() {
    let mut grid = vec![vec![None; ROWS]; COLS];
    grid[2][3] = Some(Player::Red);

    assert_eq!(
        Board::from_columns(&grid, CONNECT),
        Err(BoardError::FloatingPiece { column: 3, row: 3 })
    );
}

#[test]
fn test_display() {
    let mut board = Board::with_dimensions(3, 2, 2).unwrap();
    board.apply_move(1, Player::Red).unwrap();
    board.apply_move(1, Player::Yellow).unwrap();
    board.apply_move(3, Player::Red).unwrap();

    assert_eq!(board.to_string(), "YOO\nROR");
}

#[test]
fn test_equality_ignores_last_move() {
    let mut board = Board::new();
    let empty = Board::new();
    board.apply_move(5, Player::Red).unwrap();
    assert_ne!(board, empty);

    board.undo_move(5);
    assert_eq!(board, empty);
}

#[test]
fn test_random_games_invariants() {
    for seed in 0..50 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut board = Board::new();
        let mut player = Player::Red;
        let mut history = Vec::new();
        let mut snapshots = vec![board.clone()];

        while !board.is_terminal() {
            let legal = board.legal_moves();
            assert!(
                !legal.is_empty(),
                "Non-terminal board must have legal moves (seed={seed})"
            );

            let column = legal[rng.gen_range(0..legal.len())];
            board.apply_move(column, player).unwrap();
            history.push(column);
            snapshots.push(board.clone());
            player = player.opponent();

            assert_gravity(&board);
            // Before the game ends nobody has a line anywhere
            if !board.is_terminal() {
                assert_eq!(board.scan_winner(), None, "seed={seed}");
            }
        }

        // Fast and full-board detection agree on the final position
        assert_eq!(board.winner_at_last_move(), board.scan_winner(), "seed={seed}");
        assert_eq!(board.winner(), board.scan_outcome(), "seed={seed}");

        // Undo everything in reverse, matching each earlier snapshot
        while let Some(column) = history.pop() {
            board.undo_move(column);
            snapshots.pop();
            let expected = snapshots.last().unwrap();
            assert_eq!(&board, expected, "seed={seed}");
            assert_eq!(board.legal_moves(), expected.legal_moves());
            assert_eq!(board.scan_outcome(), expected.scan_outcome());
            assert_gravity(&board);
        }
        assert_eq!(board, Board::new());
        assert_eq!(board.move_count(), 0);
    }
}
