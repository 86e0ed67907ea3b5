use std::fmt::{self, Debug, Display, Formatter};

use crate::map::Map;
use crate::moves::Moves;
use crate::state::State;

pub struct SolutionFormatter<'a> {
    map: &'a Map,
    initial_state: &'a State,
    moves: &'a Moves,
}

impl<'a> SolutionFormatter<'a> {
    pub(crate) fn new(map: &'a Map, initial_state: &'a State, moves: &'a Moves) -> Self {
        Self {
            map,
            initial_state,
            moves,
        }
    }
}

impl Display for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // moves are not validated, a box in the way just gets pushed
        writeln!(f, "{}", self.map.format_with_state(self.initial_state))?;
        let mut last_state = self.initial_state.clone();
        for mov in self.moves.iter() {
            let new_player_pos = last_state.player_pos + mov.dir;
            let new_boxes = if last_state.has_box(new_player_pos) {
                last_state.boxes_after_push(new_player_pos, new_player_pos + mov.dir)
            } else {
                last_state.boxes.clone()
            };
            let new_state = State::new(new_player_pos, new_boxes);
            writeln!(f, "{}", self.map.format_with_state(&new_state))?;
            last_state = new_state;
        }
        Ok(())
    }
}

impl Debug for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
