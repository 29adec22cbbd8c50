use tictactoe::{best_move, Board};

/// Plays both sides optimally from the empty board and prints each
/// position. The classic result: the game is always drawn.
fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }

    tracing_subscriber::fmt::init();

    let mut board = Board::empty();
    let mut ply = 0;

    while !board.is_terminal() {
        let mover = board.to_move();
        let action = best_move(&board).expect("non-terminal boards always have a move");
        board = board
            .apply(action)
            .expect("best_move only returns legal actions");

        ply += 1;
        println!("Ply {ply}: {mover} plays ({}, {})", action.row, action.col);
        println!("{board}");
        println!();
    }

    match board.winner() {
        Some(mark) => println!("{mark} wins"),
        None => println!("Draw"),
    }
}
