use std::fmt;
use std::fmt::{Debug, Display, Formatter};

use crate::data::{MapCell, Pos};
use crate::state::State;
use crate::vec2d::Vec2d;

pub struct MapFormatter<'a> {
    map: &'a Map,
    state: Option<&'a State>,
}

impl<'a> MapFormatter<'a> {
    pub(crate) fn new(map: &'a Map, state: Option<&'a State>) -> Self {
        Self { map, state }
    }
}

impl Display for MapFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.map.write_xsb(self.state, f)
    }
}

impl Debug for MapFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Contents {
    Empty,
    Box,
    Player,
}

impl Default for Contents {
    fn default() -> Self {
        Contents::Empty
    }
}

/// The static part of a level - walls and goals.
#[derive(Clone, PartialEq, Eq)]
pub struct Map {
    pub(crate) grid: Vec2d<MapCell>,
    pub(crate) goals: Vec<Pos>,
}

impl Map {
    pub fn new(grid: Vec2d<MapCell>, mut goals: Vec<Pos>) -> Self {
        goals.sort();
        goals.dedup();
        Map { grid, goals }
    }

    pub fn grid(&self) -> &Vec2d<MapCell> {
        &self.grid
    }

    pub fn goals(&self) -> &[Pos] {
        &self.goals
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Cells outside the grid count as walls.
    pub fn is_wall(&self, pos: Pos) -> bool {
        self.grid.get(pos).map_or(true, |&cell| cell == MapCell::Wall)
    }

    pub fn is_goal(&self, pos: Pos) -> bool {
        self.grid.get(pos) == Some(&MapCell::Goal)
    }

    pub fn format_with_state<'a>(&'a self, state: &'a State) -> MapFormatter<'a> {
        MapFormatter::new(self, Some(state))
    }

    fn write_xsb(&self, state: Option<&State>, f: &mut Formatter<'_>) -> fmt::Result {
        let mut state_grid: Vec2d<Contents> = self.grid.scratchpad();
        if let Some(state) = state {
            for &b in &state.boxes {
                state_grid[b] = Contents::Box;
            }
            state_grid[state.player_pos] = Contents::Player;
        }

        for r in 0..self.rows() as i32 {
            // don't print trailing empty cells to match the input level strings
            let last_non_empty = (0..self.cols() as i32)
                .map(|c| Pos::new(r, c))
                .filter(|&pos| {
                    self.grid[pos] != MapCell::Empty || state_grid[pos] != Contents::Empty
                })
                .map(|pos| pos.c + 1)
                .last()
                .unwrap_or(0);

            for c in 0..last_non_empty {
                let pos = Pos::new(r, c);
                let ch = match (self.grid[pos], state_grid[pos]) {
                    (MapCell::Wall, _) => '#',
                    (MapCell::Empty, Contents::Empty) => ' ',
                    (MapCell::Empty, Contents::Box) => '$',
                    (MapCell::Empty, Contents::Player) => '@',
                    (MapCell::Goal, Contents::Empty) => '.',
                    (MapCell::Goal, Contents::Box) => '*',
                    (MapCell::Goal, Contents::Player) => '+',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Display for Map {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_xsb(None, f)
    }
}

impl Debug for Map {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
