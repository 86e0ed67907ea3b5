mod backtracking;
mod freeze;
mod frontier;
mod preprocessing;
mod stats;

use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};

use fnv::{FnvHashMap, FnvHashSet};
use log::{debug, trace};
use separator::Separatable;

use crate::config::Method;
use crate::data::{Dir, Pos};
use crate::level::Level;
use crate::map::Map;
use crate::moves::Moves;
use crate::state::State;
use crate::vec2d::Vec2d;
use crate::Solve;

use self::frontier::{FifoFrontier, Frontier, PriorityFrontier};

pub use self::stats::Stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverErr {
    TooSmall,
    IncompleteBorder,
    PlayerOnWall,
    BoxOnWall,
    PlayerOnBox,
    BoxesGoals,
}

impl Display for SolverErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            SolverErr::TooSmall => write!(f, "Level must be at least 3x3"),
            SolverErr::IncompleteBorder => write!(f, "Incomplete border"),
            SolverErr::PlayerOnWall => write!(f, "Player is inside a wall"),
            SolverErr::BoxOnWall => write!(f, "Some boxes are inside walls"),
            SolverErr::PlayerOnBox => write!(f, "Player stands on a box"),
            SolverErr::BoxesGoals => write!(f, "Different number of boxes and goals"),
        }
    }
}

impl Error for SolverErr {}

pub struct SolverOk {
    /// `None` if the level can't be solved.
    pub moves: Option<Moves>,
    pub stats: Stats,
    pub method: Method,
}

impl SolverOk {
    fn new(moves: Option<Moves>, stats: Stats, method: Method) -> Self {
        Self {
            moves,
            stats,
            method,
        }
    }
}

impl Debug for SolverOk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.moves {
            None => writeln!(f, "No solution")?,
            Some(ref moves) => writeln!(f, "{}: {}", self.method, moves)?,
        }
        write!(f, "{:?}", self.stats)
    }
}

impl Solve for Level {
    fn solve(&self, method: Method, print_status: bool) -> Result<SolverOk, SolverErr> {
        let solver = Solver::new(self)?;
        Ok(solver.search(method, print_status))
    }
}

/// A node of the search tree, stored in the solver's arena.
///
/// `dist` is the number of moves from the initial state (g-value),
/// `priority` is `dist` plus the heuristic (f-value) and only set when searching with a heuristic.
/// Only `state` is used to detect duplicates.
#[derive(Debug, Clone)]
pub(crate) struct SearchNode {
    pub(crate) state: State,
    pub(crate) prev: Option<usize>,
    pub(crate) dist: u32,
    pub(crate) priority: Option<u32>,
    pub(crate) in_frontier: bool,
}

type Heuristic = fn(&Map, &[Pos]) -> u32;

const EXPANSION_ORDER: [Dir; 4] = [Dir::Up, Dir::Right, Dir::Left, Dir::Down];

/// Everything about a level that doesn't change during the search.
#[derive(Debug, Clone)]
pub struct Solver {
    map: Map,
    initial_state: State,
    dead_ends: Vec2d<bool>,
}

impl Solver {
    pub fn new(level: &Level) -> Result<Self, SolverErr> {
        debug!("Processing level...");

        let map = &level.map;
        let state = &level.state;
        if map.rows() < 3 || map.cols() < 3 {
            return Err(SolverErr::TooSmall);
        }
        if map.is_wall(state.player_pos) {
            return Err(SolverErr::PlayerOnWall);
        }
        if state.boxes.iter().any(|&b| map.is_wall(b)) {
            return Err(SolverErr::BoxOnWall);
        }
        if state.has_box(state.player_pos) {
            return Err(SolverErr::PlayerOnBox);
        }
        if state.boxes.len() != map.goals.len() {
            return Err(SolverErr::BoxesGoals);
        }
        preprocessing::check_border(map, state)?;

        let dead_ends = preprocessing::find_dead_ends(map);
        debug!("Processed level");

        Ok(Solver {
            map: map.clone(),
            initial_state: state.clone(),
            dead_ends,
        })
    }

    /// Cells from which a lone box can never reach a goal. Walls are dead ends too.
    pub fn dead_ends(&self) -> &Vec2d<bool> {
        &self.dead_ends
    }

    pub fn search(&self, method: Method, print_status: bool) -> SolverOk {
        match method {
            Method::Bfs => self.search_bfs(print_status),
            Method::AStar => self.search_a_star(print_status),
        }
    }

    /// Finds a solution with the lowest number of moves.
    pub fn search_bfs(&self, print_status: bool) -> SolverOk {
        self.search_with(Method::Bfs, FifoFrontier::default(), None, print_status)
    }

    /// Finds a solution with the lowest number of moves, usually expanding fewer states than BFS.
    pub fn search_a_star(&self, print_status: bool) -> SolverOk {
        self.search_with(
            Method::AStar,
            PriorityFrontier::default(),
            Some(heuristic_goal_dists),
            print_status,
        )
    }

    fn search_with<F: Frontier>(
        &self,
        method: Method,
        mut frontier: F,
        heuristic: Option<Heuristic>,
        print_status: bool,
    ) -> SolverOk {
        debug!("Search called: {}", method);

        let mut stats = Stats::new();
        let mut nodes: Vec<SearchNode> = Vec::new();
        let mut lookup: FnvHashMap<State, usize> = FnvHashMap::default();

        let start = SearchNode {
            state: self.initial_state.clone(),
            prev: None,
            dist: 0,
            priority: heuristic.map(|h| h(&self.map, &self.initial_state.boxes)),
            in_frontier: true,
        };
        stats.add_created(start.dist);
        lookup.insert(start.state.clone(), 0);
        frontier.push(0, &start);
        nodes.push(start);

        while let Some(cur_index) = frontier.pop(&nodes) {
            nodes[cur_index].in_frontier = false;

            let cur_dist = nodes[cur_index].dist;
            if stats.add_expanded(cur_dist) && print_status {
                println!(
                    "Expanded new depth: {} (expanded {}, explored {})",
                    cur_dist,
                    stats.expanded().separated_string(),
                    (lookup.len() as u64).separated_string()
                );
            }

            if self.solved(&nodes[cur_index].state) {
                debug!("Solved, backtracking path");
                stats.set_explored(lookup.len());
                let moves = backtracking::reconstruct_moves(&nodes, cur_index);
                return SolverOk::new(Some(moves), stats, method);
            }

            for &dir in &EXPANSION_ORDER {
                if !self.can_move(&nodes[cur_index].state, dir) {
                    continue;
                }
                let mut new_node = self.apply_move(cur_index, &nodes[cur_index], dir, heuristic);
                stats.add_created(new_node.dist);

                let existing = lookup.get(&new_node.state).cloned();
                match existing {
                    None => {
                        // first time we see this configuration
                        let new_index = nodes.len();
                        new_node.in_frontier = true;
                        lookup.insert(new_node.state.clone(), new_index);
                        frontier.push(new_index, &new_node);
                        nodes.push(new_node);
                    }
                    Some(old_index) => {
                        stats.add_duplicate(new_node.dist);

                        // without a heuristic the first path found is never longer
                        if new_node.priority.is_none() || new_node.dist >= nodes[old_index].dist {
                            continue;
                        }

                        trace!(
                            "Cheaper path to a known state: {} -> {}",
                            nodes[old_index].dist,
                            new_node.dist
                        );
                        let old_node = &mut nodes[old_index];
                        old_node.dist = new_node.dist;
                        old_node.priority = new_node.priority;
                        old_node.prev = new_node.prev;
                        if old_node.in_frontier {
                            frontier.update(old_index, old_node);
                        } else {
                            old_node.in_frontier = true;
                            stats.add_reopened();
                            frontier.push(old_index, old_node);
                        }
                    }
                }
            }
        }

        debug!("Frontier exhausted, no solution");
        stats.set_explored(lookup.len());
        SolverOk::new(None, stats, method)
    }

    fn solved(&self, state: &State) -> bool {
        // the number of boxes and goals is the same so this means every goal has a box
        state.boxes.iter().all(|&b| self.map.is_goal(b))
    }

    /// Too close to the edge of the grid to look two cells ahead.
    fn at_margin(&self, pos: Pos, dir: Dir) -> bool {
        let rows = self.map.rows() as i32;
        let cols = self.map.cols() as i32;
        match dir {
            Dir::Up => pos.r <= 1,
            Dir::Down => pos.r >= rows - 2,
            Dir::Left => pos.c <= 1,
            Dir::Right => pos.c >= cols - 2,
        }
    }

    fn is_dead_end(&self, pos: Pos) -> bool {
        self.dead_ends.get(pos).cloned().unwrap_or(true)
    }

    /// Whether the player can step or push in `dir`.
    ///
    /// Pushes are refused if the box would end up in a wall, another box, a dead end
    /// or a freeze deadlock.
    pub fn can_move(&self, state: &State, dir: Dir) -> bool {
        let player_pos = state.player_pos;
        if self.at_margin(player_pos, dir) {
            return false;
        }

        let new_player_pos = player_pos + dir;
        if self.map.is_wall(new_player_pos) {
            return false;
        }
        if !state.has_box(new_player_pos) {
            return true;
        }

        let push_dest = new_player_pos + dir;
        if self.map.is_wall(push_dest) || state.has_box(push_dest) || self.is_dead_end(push_dest) {
            return false;
        }

        let new_boxes = state.boxes_after_push(new_player_pos, push_dest);
        !self.has_freeze_deadlock(&new_boxes, push_dest)
    }

    /// Whether the box at `pos` is frozen in place without being on a goal.
    ///
    /// `boxes` must contain `pos`.
    pub fn has_freeze_deadlock(&self, boxes: &[Pos], pos: Pos) -> bool {
        let mut sorted;
        let boxes = if boxes.windows(2).all(|w| w[0] < w[1]) {
            boxes
        } else {
            sorted = boxes.to_vec();
            sorted.sort();
            sorted.dedup();
            &sorted[..]
        };
        freeze::has_freeze_deadlock(
            &self.map,
            &self.dead_ends,
            boxes,
            pos,
            &mut FnvHashSet::default(),
        )
    }

    /// The node reached by moving in `dir`, the move must be legal.
    ///
    /// Cost is only computed when searching with a heuristic.
    fn apply_move(
        &self,
        index: usize,
        node: &SearchNode,
        dir: Dir,
        heuristic: Option<Heuristic>,
    ) -> SearchNode {
        let new_player_pos = node.state.player_pos + dir;
        let new_boxes = if node.state.has_box(new_player_pos) {
            node.state
                .boxes_after_push(new_player_pos, new_player_pos + dir)
        } else {
            node.state.boxes.clone()
        };

        let dist = node.dist + 1;
        let priority = heuristic.map(|h| dist + h(&self.map, &new_boxes));
        SearchNode {
            state: State {
                player_pos: new_player_pos,
                boxes: new_boxes,
            },
            prev: Some(index),
            dist,
            priority,
            in_frontier: false,
        }
    }
}

/// Sum of distances from each box to its nearest goal.
///
/// Ignores walls and other boxes so it never overestimates.
fn heuristic_goal_dists(map: &Map, boxes: &[Pos]) -> u32 {
    boxes
        .iter()
        .map(|&b| map.goals.iter().map(|&g| b.dist(g)).min().unwrap_or(0))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::data::MapCell;
    use crate::solver::preprocessing::find_dead_ends;

    fn solver(level: &str) -> Solver {
        let level: Level = level.parse().unwrap();
        Solver::new(&level).unwrap()
    }

    fn root(solver: &Solver) -> SearchNode {
        SearchNode {
            state: solver.initial_state.clone(),
            prev: None,
            dist: 0,
            priority: None,
            in_frontier: false,
        }
    }

    fn legal_moves(solver: &Solver, state: &State) -> Vec<Dir> {
        EXPANSION_ORDER
            .iter()
            .cloned()
            .filter(|&dir| solver.can_move(state, dir))
            .collect()
    }

    /// Applies `moves` one by one, each must be legal, and returns the final state.
    fn replay(solver: &Solver, moves: &Moves) -> State {
        let mut node = root(solver);
        for mov in moves.iter() {
            assert!(solver.can_move(&node.state, mov.dir));
            let next = solver.apply_move(0, &node, mov.dir, None);
            assert_eq!(next.state.boxes != node.state.boxes, mov.is_push);
            node = next;
        }
        node.state
    }

    /// Overestimates so states get expanded before their shortest path is known.
    fn inflated_goal_dists(map: &Map, boxes: &[Pos]) -> u32 {
        5 * heuristic_goal_dists(map, boxes)
    }

    #[test]
    fn validation() {
        let cases = [
            ("###\n#@#", SolverErr::TooSmall),
            ("#####\n#@$.\n#####", SolverErr::IncompleteBorder),
            ("#####\n#@$ #\n#####", SolverErr::BoxesGoals),
            ("#####\n#@ .#\n#####", SolverErr::BoxesGoals),
        ];
        for &(level, expected) in &cases {
            let level: Level = level.parse().unwrap();
            assert_eq!(Solver::new(&level).unwrap_err(), expected);
        }

        let level: Level = "#####\n#@$.#\n#####".parse().unwrap();
        let mut on_box = level.clone();
        on_box.state = State::new(Pos::new(1, 2), vec![Pos::new(1, 2)]);
        assert_eq!(Solver::new(&on_box).unwrap_err(), SolverErr::PlayerOnBox);
        let mut in_wall = level.clone();
        in_wall.state = State::new(Pos::new(0, 0), vec![Pos::new(1, 2)]);
        assert_eq!(Solver::new(&in_wall).unwrap_err(), SolverErr::PlayerOnWall);
        let mut box_in_wall = level;
        box_in_wall.state = State::new(Pos::new(1, 1), vec![Pos::new(0, 2)]);
        assert_eq!(Solver::new(&box_in_wall).unwrap_err(), SolverErr::BoxOnWall);
    }

    #[test]
    fn one_push() {
        let level = r"
#####
#   #
#@$.#
#   #
#####";
        let solver = solver(level);

        let bfs = solver.search_bfs(false);
        assert_eq!(bfs.moves.as_ref().unwrap().to_string(), "R");
        assert_eq!(bfs.stats.expanded(), 3);
        assert_eq!(bfs.stats.explored(), 5);

        let a_star = solver.search_a_star(false);
        assert_eq!(a_star.moves.as_ref().unwrap().to_string(), "R");
        assert_eq!(a_star.stats.expanded(), 2);
        assert_eq!(a_star.stats.explored(), 4);
    }

    #[test]
    fn one_way() {
        let level = r"
###
#.#
# #
#$#
#@#
###";
        let solver = solver(level);
        for &method in &[Method::Bfs, Method::AStar] {
            let solution = solver.search(method, false);
            assert_eq!(solution.method, method);
            assert_eq!(solution.moves.as_ref().unwrap().to_string(), "UU");
            assert_eq!(solution.stats.expanded(), 3);
            assert_eq!(solution.stats.explored(), 4);
        }
    }

    #[test]
    fn box_in_corner() {
        let level = r"
#####
#$  #
#  .#
#@  #
#####";
        let solver = solver(level);
        assert!(solver.has_freeze_deadlock(&solver.initial_state.boxes, Pos::new(1, 1)));

        for &method in &[Method::Bfs, Method::AStar] {
            let solution = solver.search(method, false);
            assert!(solution.moves.is_none());
            // the player can walk around but never move the box
            assert_eq!(solution.stats.expanded(), 8);
            assert_eq!(solution.stats.explored(), 8);
            assert_eq!(solution.stats.reopened(), 0);
        }
    }

    #[test]
    fn no_boxes() {
        let solver = solver("###\n#@#\n###");
        for &method in &[Method::Bfs, Method::AStar] {
            let solution = solver.search(method, false);
            let moves = solution.moves.unwrap();
            assert!(moves.is_empty());
            assert_eq!(solution.stats.expanded(), 1);
            assert_eq!(solution.stats.explored(), 1);
        }
    }

    #[test]
    fn already_solved() {
        let solver = solver("#####\n#@* #\n#####");
        let solution = solver.search_bfs(false);
        assert_eq!(solution.moves, Some(Moves::default()));
        assert_eq!(solution.stats.expanded(), 1);
    }

    #[test]
    fn margin() {
        // no walls at all - the margin alone keeps the player from looking outside the grid
        let grid = Vec2d::new(&vec![vec![MapCell::Empty; 3]; 3]);
        let map = Map::new(grid, vec![]);
        let solver = Solver {
            dead_ends: find_dead_ends(&map),
            map,
            initial_state: State::new(Pos::new(1, 1), vec![]),
        };
        assert!(legal_moves(&solver, &solver.initial_state).is_empty());
    }

    #[test]
    fn pushes() {
        let level = r"
######
#   .#
# @$.#
# $  #
#    #
######";
        let solver = solver(level);
        let state = &solver.initial_state;
        // up and left are steps, right is a push to a goal,
        // down would push a box into the bottom row which is a dead end
        assert_eq!(
            legal_moves(&solver, state),
            vec![Dir::Up, Dir::Right, Dir::Left]
        );
        assert!(solver.dead_ends[Pos::new(4, 2)]);
    }

    #[test]
    fn box_blocks_box() {
        let level = r"
#######
#     #
#@$$..#
#     #
#######";
        let solver = solver(level);
        assert_eq!(
            legal_moves(&solver, &solver.initial_state),
            vec![Dir::Up, Dir::Down]
        );
    }

    #[test]
    fn applying_moves() {
        let level = r"
######
#    #
# @$.#
#    #
######";
        let solver = solver(level);
        let root = root(&solver);

        let step = solver.apply_move(0, &root, Dir::Up, None);
        assert_eq!(step.state.player_pos, Pos::new(1, 2));
        assert_eq!(step.state.boxes, root.state.boxes);
        assert_eq!(step.prev, Some(0));
        assert_eq!(step.dist, 1);
        assert_eq!(step.priority, None);

        let push = solver.apply_move(0, &root, Dir::Right, Some(heuristic_goal_dists));
        assert_eq!(push.state.player_pos, Pos::new(2, 3));
        assert_eq!(push.state.boxes, vec![Pos::new(2, 4)]);
        assert_eq!(push.priority, Some(1));

        // the input is untouched
        assert_eq!(root.state.boxes, vec![Pos::new(2, 3)]);
    }

    #[test]
    fn box_count_is_conserved() {
        let level = r"
#######
#  .  #
# $$  #
#.@ $ #
#   . #
#######";
        let solver = solver(level);
        let mut frontier = vec![root(&solver)];
        for _ in 0..4 {
            let mut next = Vec::new();
            for node in &frontier {
                for &dir in &EXPANSION_ORDER {
                    if solver.can_move(&node.state, dir) {
                        let new_node = solver.apply_move(0, node, dir, None);
                        assert_eq!(new_node.state.boxes.len(), solver.map.goals.len());
                        next.push(new_node);
                    }
                }
            }
            frontier = next;
        }
        assert!(!frontier.is_empty());
    }

    #[test]
    fn heuristic() {
        let level: Level = r"
#######
#.   $#
#  $  #
#@   .#
#######"
            .parse()
            .unwrap();
        // (1,5) -> (3,5) is 2, (2,3) -> (1,1) is 3 and (2,3) -> (3,5) is 3
        assert_eq!(heuristic_goal_dists(&level.map, &level.state.boxes), 5);
        assert_eq!(heuristic_goal_dists(&level.map, &[]), 0);
    }

    #[test]
    fn idempotent() {
        let level = r"
#######
#.$ $.#
#  @  #
#######";
        let solver = solver(level);
        for &method in &[Method::Bfs, Method::AStar] {
            let first = solver.search(method, false);
            let second = solver.search(method, false);
            assert_eq!(first.moves, second.moves);
            assert_eq!(first.stats, second.stats);
            assert_eq!(first.moves.unwrap().move_cnt(), 4);
        }
    }

    #[test]
    fn reopening() {
        let level = r"
######
# #  #
# $  #
# .$@#
#.   #
######";
        let solver = solver(level);
        let solution = solver.search_with(
            Method::AStar,
            PriorityFrontier::default(),
            Some(inflated_goal_dists),
            false,
        );
        assert!(solution.stats.reopened() > 0);

        let moves = solution.moves.unwrap();
        let end = replay(&solver, &moves);
        assert!(solver.solved(&end));
        assert_eq!(end.boxes.len(), 2);

        // still a solution, just not necessarily a shortest one
        let shortest = solver.search_bfs(false).moves.unwrap();
        assert!(moves.move_cnt() >= shortest.move_cnt());
        assert!(solver.solved(&replay(&solver, &shortest)));
    }
}
