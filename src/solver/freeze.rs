use fnv::FnvHashSet;

use crate::data::{Dir, Pos};
use crate::map::Map;
use crate::state::has_box;
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    fn neighbors(self, pos: Pos) -> [Pos; 2] {
        match self {
            Axis::Vertical => [pos + Dir::Down, pos + Dir::Up],
            Axis::Horizontal => [pos + Dir::Right, pos + Dir::Left],
        }
    }
}

/// One box whose frozen-ness is being determined.
#[derive(Debug)]
struct Frame {
    pos: Pos,
    axis: Axis,
    /// Index of the next neighbor to try as a blocking box.
    next: usize,
}

impl Frame {
    fn new(pos: Pos) -> Self {
        Frame {
            pos,
            axis: Axis::Vertical,
            next: 0,
        }
    }
}

enum Step {
    Frozen,
    Free,
    Descend(Pos),
}

/// Detects whether the box at `pos` (which just got pushed there) can never move again.
///
/// A box is blocked along an axis if there's a wall on either side, dead ends on both sides
/// or a box on either side which is itself frozen. Boxes already in `visited` count as frozen,
/// this is what breaks cycles of boxes blocking each other.
/// It's only a deadlock if the box is blocked along both axes
/// and at least one of the visited boxes is not on a goal.
///
/// `boxes` must be sorted and already contain `pos`.
pub(crate) fn has_freeze_deadlock(
    map: &Map,
    dead_ends: &Vec2d<bool>,
    boxes: &[Pos],
    pos: Pos,
    visited: &mut FnvHashSet<Pos>,
) -> bool {
    let is_dead_end = |p: Pos| dead_ends.get(p).cloned().unwrap_or(true);

    let probe = |frame: &mut Frame, visited: &FnvHashSet<Pos>| -> Step {
        let [a, b] = frame.axis.neighbors(frame.pos);
        if map.is_wall(a) || map.is_wall(b) {
            return Step::Frozen;
        }
        if is_dead_end(a) && is_dead_end(b) {
            return Step::Frozen;
        }
        let candidates = [a, b];
        while frame.next < candidates.len() {
            let neighbor = candidates[frame.next];
            if has_box(boxes, neighbor) {
                if visited.contains(&neighbor) {
                    return Step::Frozen;
                }
                return Step::Descend(neighbor);
            }
            frame.next += 1;
        }
        Step::Free
    };

    visited.insert(pos);
    let mut stack = vec![Frame::new(pos)];
    // result of the most recently finished frame, consumed by its parent
    let mut returned: Option<bool> = None;

    loop {
        let frame = match stack.last_mut() {
            Some(frame) => frame,
            None => return returned.unwrap_or(false),
        };

        let step = match returned.take() {
            Some(true) => Step::Frozen,
            Some(false) => {
                frame.next += 1;
                probe(&mut *frame, &*visited)
            }
            None => probe(&mut *frame, &*visited),
        };

        match step {
            Step::Frozen => match frame.axis {
                Axis::Vertical => {
                    frame.axis = Axis::Horizontal;
                    frame.next = 0;
                }
                Axis::Horizontal => {
                    let off_goal = visited.iter().any(|&b| !map.is_goal(b));
                    stack.pop();
                    returned = Some(off_goal);
                }
            },
            Step::Free => {
                stack.pop();
                returned = Some(false);
            }
            Step::Descend(neighbor) => {
                visited.insert(neighbor);
                stack.push(Frame::new(neighbor));
            }
        }
    }
}
