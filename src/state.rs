use crate::data::Pos;

/// Everything that changes during the game - the identity of a search node.
///
/// Boxes are kept sorted so that two states which only list their boxes
/// in a different order compare (and hash) equal.
#[derive(Debug, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct State {
    pub(crate) player_pos: Pos,
    pub(crate) boxes: Vec<Pos>,
}

impl State {
    pub fn new(player_pos: Pos, mut boxes: Vec<Pos>) -> State {
        boxes.sort();
        boxes.dedup();
        State { player_pos, boxes }
    }

    pub(crate) fn has_box(&self, pos: Pos) -> bool {
        has_box(&self.boxes, pos)
    }

    /// Copy of the box set with the box at `from` moved to `to`.
    pub(crate) fn boxes_after_push(&self, from: Pos, to: Pos) -> Vec<Pos> {
        let mut new_boxes = self.boxes.clone();
        if let Ok(i) = new_boxes.binary_search(&from) {
            new_boxes.remove(i);
        }
        if let Err(i) = new_boxes.binary_search(&to) {
            new_boxes.insert(i, to);
        }
        new_boxes
    }
}

/// `boxes` must be sorted.
pub(crate) fn has_box(boxes: &[Pos], pos: Pos) -> bool {
    boxes.binary_search(&pos).is_ok()
}
