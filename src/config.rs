use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    /// Breadth-first search - uninformed, depth by depth.
    Bfs,
    /// A* guided by the sum of distances from each box to its nearest goal.
    AStar,
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Method::Bfs => write!(f, "bfs"),
            Method::AStar => write!(f, "a-star"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert_eq!(Method::Bfs.to_string(), "bfs");
        assert_eq!(Method::AStar.to_string(), "a-star");
    }
}
