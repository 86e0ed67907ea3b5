use std::collections::VecDeque;

use crate::data::{Dir, DIRECTIONS};
use crate::map::Map;
use crate::solver::SolverErr;
use crate::state::State;
use crate::vec2d::Vec2d;

pub(crate) fn check_border(map: &Map, state: &State) -> Result<(), SolverErr> {
    // make sure the level is surrounded by wall
    let mut visited: Vec2d<bool> = map.grid().scratchpad();

    let mut to_visit = vec![state.player_pos];
    visited[state.player_pos] = true;
    while let Some(cur) = to_visit.pop() {
        for &dir in &DIRECTIONS {
            let next = cur + dir;
            // this is the only place in the solver where we need to check bounds
            // everything after that will be surrounded by walls
            if !map.grid().contains(next) {
                // we got out of bounds without hitting a wall
                return Err(SolverErr::IncompleteBorder);
            }
            if !visited[next] && !map.is_wall(next) {
                visited[next] = true;
                to_visit.push(next);
            }
        }
    }

    Ok(())
}

/// Marks cells from which a lone box can never be pushed to any goal.
///
/// Works backwards - boxes are pulled from the goals, a pull needs the cell the box moves to
/// and the cell behind it (where the player ends up) to be free. Other boxes are ignored.
/// Every cell that is never reached, walls included, is a dead end.
#[inline(never)] // this is called only once and this way it's easier to see in callgrind
pub(crate) fn find_dead_ends(map: &Map) -> Vec2d<bool> {
    let mut dead_ends = map.grid().scratchpad_with_default(true);

    let mut to_visit = VecDeque::new();
    for &goal in map.goals() {
        if dead_ends[goal] {
            dead_ends[goal] = false;
            to_visit.push_back(goal);
        }
    }

    while let Some(box_pos) = to_visit.pop_front() {
        for &dir in &PULL_ORDER {
            let new_box_pos = box_pos + dir;
            let player_pos = new_box_pos + dir;
            if map.is_wall(new_box_pos) || map.is_wall(player_pos) {
                continue;
            }
            if dead_ends[new_box_pos] {
                dead_ends[new_box_pos] = false;
                to_visit.push_back(new_box_pos);
            }
        }
    }

    dead_ends
}

const PULL_ORDER: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];
