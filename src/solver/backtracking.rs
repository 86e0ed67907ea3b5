use crate::moves::{Move, Moves};
use crate::solver::SearchNode;

// Terminology:
// move = changing player position by one cell
// push = a move that changes a box position
// step = a move that doesn't change a box position

/// Follows parent links from `final_index` back to the root
/// and returns the moves in the order they were made.
pub(crate) fn reconstruct_moves(nodes: &[SearchNode], final_index: usize) -> Moves {
    let mut moves = Vec::new();

    let mut cur = &nodes[final_index];
    while let Some(prev_index) = cur.prev {
        let prev = &nodes[prev_index];
        let dir = prev.state.player_pos.dir_to(cur.state.player_pos);
        let is_push = prev.state.boxes != cur.state.boxes;
        moves.push(Move::new(dir, is_push));
        cur = prev;
    }

    moves.into_iter().rev().collect()
}
