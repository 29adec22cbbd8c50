//! Exhaustive minimax over the full game tree.
//!
//! The tree is at most nine plies deep with branching that shrinks every
//! ply, so the whole thing is searched without memoization or pruning. `X`
//! maximizes the terminal utility, `O` minimizes it, and ties between
//! equally-scored actions always resolve to the first one in enumeration
//! order, which keeps the chosen move deterministic.

use text_trees::StringTreeNode;
use tracing::debug;

use crate::board::{Action, Board, Mark};

/// A fully evaluated game tree, as returned by [search].
///
/// Every interior node keeps all the options it considered, sorted so the
/// first element is the move the player to act would choose. The score of a
/// node always equals the score of its first option.
#[derive(Debug, Clone)]
pub enum SearchTree {
    /// An interior node where the player to act picked among `options`.
    Node {
        /// Whether the player to act was maximizing (`X`) or minimizing (`O`).
        is_maximizing: bool,
        /// Every legal action paired with its evaluated subtree, best first.
        ///
        /// The sort is stable, so among equal scores the row-major
        /// enumeration order survives and the head is the deterministic
        /// choice.
        options: Vec<(Action, SearchTree)>,
        /// The backed-up score of the chosen option.
        score: i8,
    },
    /// A terminal position; the score is the board's utility.
    Leaf {
        /// +1 for an `X` win, −1 for an `O` win, 0 for a draw.
        score: i8,
    },
}

impl SearchTree {
    /// The backed-up score of this node.
    pub fn score(&self) -> i8 {
        match self {
            SearchTree::Node { score, .. } => *score,
            SearchTree::Leaf { score } => *score,
        }
    }

    /// The action the player to act would choose here, if any.
    pub fn best_action(&self) -> Option<Action> {
        match self {
            SearchTree::Node { options, .. } => options.first().map(|(action, _)| *action),
            SearchTree::Leaf { .. } => None,
        }
    }

    /// The sequence of actions both players take under optimal play from
    /// this node down to the end of the game.
    pub fn principal_line(&self) -> Vec<Action> {
        match self {
            SearchTree::Leaf { .. } => vec![],
            SearchTree::Node { options, .. } => match options.first() {
                Some((action, subtree)) => {
                    let mut line = subtree.principal_line();
                    line.insert(0, *action);
                    line
                }
                None => vec![],
            },
        }
    }

    /// A text rendering of the explored tree, one node per considered
    /// action, annotated with the backed-up score. `None` for a leaf.
    pub fn to_text_tree(&self) -> Option<String> {
        let node = self.to_text_tree_node("root".to_owned())?;
        Some(format!("{node}"))
    }

    fn to_text_tree_node(&self, label: String) -> Option<StringTreeNode> {
        match self {
            SearchTree::Leaf { .. } => None,
            SearchTree::Node { options, score, .. } => {
                let mut node = StringTreeNode::new(format!("{label} [{score}]"));
                for (action, subtree) in options {
                    let child_label = format!("({}, {})", action.row, action.col);
                    let child = subtree
                        .to_text_tree_node(child_label.clone())
                        .unwrap_or_else(|| {
                            StringTreeNode::new(format!("{child_label} [{}]", subtree.score()))
                        });
                    node.push_node(child);
                }

                Some(node)
            }
        }
    }
}

/// Evaluate the full game tree below `board`.
///
/// Terminal boards come back as a [SearchTree::Leaf] scored by
/// [Board::utility]; everything else recurses over [Board::available_actions].
pub fn search(board: &Board) -> SearchTree {
    if board.is_terminal() {
        return SearchTree::Leaf {
            score: board.utility(),
        };
    }

    let is_maximizing = board.to_move() == Mark::X;

    let mut options: Vec<(Action, SearchTree)> = board
        .available_actions()
        .map(|action| {
            let child = board
                .apply(action)
                .expect("available_actions only yields empty cells");
            (action, search(&child))
        })
        .collect();

    // Stable sort: enumeration order breaks ties, so the head is the
    // deterministic choice for the player to act.
    if is_maximizing {
        options.sort_by(|a, b| b.1.score().cmp(&a.1.score()));
    } else {
        options.sort_by(|a, b| a.1.score().cmp(&b.1.score()));
    }

    let score = options[0].1.score();

    SearchTree::Node {
        is_maximizing,
        options,
        score,
    }
}

/// The optimal action for the player to move, or `None` when the game is
/// already over.
pub fn best_move(board: &Board) -> Option<Action> {
    if board.is_terminal() {
        return None;
    }

    let tree = search(board);
    let chosen = tree.best_action();

    if let Some(action) = chosen {
        debug!(
            row = action.row,
            col = action.col,
            score = tree.score(),
            "chose move"
        );
    }

    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Mark;

    fn board_from(rows: [&str; 3]) -> Board {
        let mut cells = [[None; 3]; 3];
        for (row, pattern) in rows.iter().enumerate() {
            for (col, ch) in pattern.chars().enumerate() {
                cells[row][col] = match ch {
                    'X' => Some(Mark::X),
                    'O' => Some(Mark::O),
                    _ => None,
                };
            }
        }
        Board::from_cells(cells)
    }

    #[test]
    fn terminal_board_has_no_best_move() {
        let board = board_from(["XXX", "OO.", "..."]);
        assert_eq!(best_move(&board), None);
    }

    #[test]
    fn takes_an_immediate_win() {
        // X to move, completing the top row beats everything else.
        let board = board_from(["XX.", "OO.", "..."]);
        assert_eq!(best_move(&board), Some(Action { row: 0, col: 2 }));
    }

    #[test]
    fn minimizer_takes_an_immediate_win() {
        // O to move with two on the middle row.
        let board = board_from(["XX.", "OO.", "X.."]);
        assert_eq!(best_move(&board), Some(Action { row: 1, col: 2 }));
    }

    #[test]
    fn blocks_an_immediate_loss() {
        // X to move; O threatens the left column, and X has no win of its
        // own, so the block is forced.
        let board = board_from(["O.X", "O..", ".X."]);
        assert_eq!(best_move(&board), Some(Action { row: 2, col: 0 }));
    }

    #[test]
    fn empty_board_ties_resolve_to_first_action() {
        // Every opening move leads to a draw under optimal play, so the
        // tie-break picks the first row-major action.
        let board = Board::empty();
        assert_eq!(best_move(&board), Some(Action { row: 0, col: 0 }));
    }

    #[test]
    fn tree_score_matches_first_option() {
        let tree = search(&board_from(["XX.", "OO.", "..."]));
        match &tree {
            SearchTree::Node { options, score, .. } => {
                assert_eq!(*score, options[0].1.score());
                assert_eq!(*score, 1);
            }
            SearchTree::Leaf { .. } => panic!("expected an interior node"),
        }
    }

    #[test]
    fn optimal_self_play_always_draws() {
        let mut board = Board::empty();
        while !board.is_terminal() {
            let action = best_move(&board).unwrap();
            board = board.apply(action).unwrap();
        }

        assert_eq!(board.winner(), None);
        assert_eq!(board.utility(), 0);
    }

    #[test]
    fn principal_line_plays_out_to_a_terminal_board() {
        let mut board = Board::empty();
        let line = search(&board).principal_line();

        for action in line {
            board = board.apply(action).unwrap();
        }

        assert!(board.is_terminal());
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn text_tree_is_rendered_for_interior_nodes() {
        // One move from the end so the rendering stays small.
        let board = board_from(["XOX", "XOO", "OX."]);
        let tree = search(&board);

        assert!(tree.to_text_tree().is_some());
        assert!(search(&board.apply(Action { row: 2, col: 2 }).unwrap())
            .to_text_tree()
            .is_none());
    }
}
