#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! An adversarial-search exercise: the classic 3×3 marks game solved by
//! exhaustive minimax.
//!
//! The [board] module owns the immutable position snapshot and its
//! transition function; the [search] module evaluates the full game tree
//! and picks the optimal move for whichever player is to act. The tree is
//! small enough (depth ≤ 9, branching ≤ 9) that no pruning or memoization
//! is needed.
//!
//! ```rust
//! use tictactoe::{best_move, Action, Board};
//!
//! let board = Board::empty();
//! let opening = best_move(&board).unwrap();
//!
//! // All openings draw under optimal play, so the tie-break picks the
//! // first cell in row-major order.
//! assert_eq!(opening, Action { row: 0, col: 0 });
//!
//! let board = board.apply(opening).unwrap();
//! assert!(!board.is_terminal());
//! ```

pub mod board;
pub mod search;

pub use board::{Action, Board, IllegalAction, Mark};
pub use search::{best_move, search, SearchTree};
