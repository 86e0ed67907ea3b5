use std::fmt::{self, Display, Formatter, Write};
use std::iter::FromIterator;
use std::slice;

use crate::data::Dir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub dir: Dir,
    /// A box moved along with the player.
    pub is_push: bool,
}

impl Move {
    pub fn new(dir: Dir, is_push: bool) -> Self {
        Move { dir, is_push }
    }

    /// LURD letter, upper case for pushes.
    pub fn to_lurd(self) -> char {
        let letter = self.dir.to_lurd();
        if self.is_push {
            letter.to_ascii_uppercase()
        } else {
            letter
        }
    }
}

/// Path from the initial state to the solved one, in the order the player makes the moves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Moves(Vec<Move>);

impl Moves {
    pub fn move_cnt(&self) -> usize {
        self.0.len()
    }

    pub fn push_cnt(&self) -> usize {
        self.0.iter().filter(|m| m.is_push).count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Move> {
        self.0.iter()
    }
}

impl FromIterator<Move> for Moves {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        Moves(iter.into_iter().collect())
    }
}

/// LURD notation, e.g. `uRlL`.
impl Display for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|m| f.write_char(m.to_lurd()))
    }
}
