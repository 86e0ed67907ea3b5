use std::fmt::{Debug, Display, Formatter, Result};

use prettytable::format::consts::FORMAT_CLEAN;
use prettytable::{Cell, Row, Table};
use separator::Separatable;

#[derive(Clone, PartialEq, Eq, Default)]
pub struct Stats {
    created_states: Vec<u64>,
    duplicate_states: Vec<u64>,
    expanded_states: Vec<u64>,
    reopened_states: u64,
    explored_states: u64,
}

impl Stats {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of states taken out of the frontier, the solution included.
    pub fn expanded(&self) -> u64 {
        self.expanded_states.iter().sum()
    }

    /// Number of unique states discovered (the size of the seen set).
    pub fn explored(&self) -> u64 {
        self.explored_states
    }

    pub fn total_created(&self) -> u64 {
        self.created_states.iter().sum()
    }

    pub fn total_duplicates(&self) -> u64 {
        self.duplicate_states.iter().sum()
    }

    pub fn reopened(&self) -> u64 {
        self.reopened_states
    }

    pub(crate) fn add_created(&mut self, depth: u32) -> bool {
        Self::add(&mut self.created_states, depth)
    }

    pub(crate) fn add_duplicate(&mut self, depth: u32) -> bool {
        Self::add(&mut self.duplicate_states, depth)
    }

    /// Returns true if this is the first state expanded at this depth.
    pub(crate) fn add_expanded(&mut self, depth: u32) -> bool {
        Self::add(&mut self.expanded_states, depth)
    }

    pub(crate) fn add_reopened(&mut self) {
        self.reopened_states += 1;
    }

    pub(crate) fn set_explored(&mut self, explored: usize) {
        self.explored_states = explored as u64;
    }

    fn add(counts: &mut Vec<u64>, depth: u32) -> bool {
        let mut ret = false;

        // while because some depths might be skipped (A* jumps around)
        while depth as usize >= counts.len() {
            counts.push(0);
            ret = true;
        }
        counts[depth as usize] += 1;
        ret
    }

    /// Per-depth counts - created / duplicates / expanded.
    pub fn depth_table(&self) -> Table {
        let mut table = Table::new();
        table.set_format(*FORMAT_CLEAN);
        table.set_titles(Row::new(vec![
            Cell::new("Depth"),
            Cell::new("Created"),
            Cell::new("Duplicates"),
            Cell::new("Expanded"),
        ]));

        let depths = self
            .created_states
            .len()
            .max(self.duplicate_states.len())
            .max(self.expanded_states.len());
        let at = |counts: &[u64], i: usize| counts.get(i).cloned().unwrap_or(0);
        for i in 0..depths {
            table.add_row(Row::new(vec![
                Cell::new(&format!("{}:", i)),
                Cell::new(&at(&self.created_states, i).separated_string()),
                Cell::new(&at(&self.duplicate_states, i).separated_string()),
                Cell::new(&at(&self.expanded_states, i).separated_string()),
            ]));
        }
        table
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "created by depth: {:?}", self.created_states)?;
        writeln!(f, "reached duplicates by depth: {:?}", self.duplicate_states)?;
        writeln!(f, "expanded by depth: {:?}", self.expanded_states)?;
        writeln!(f, "total reopened: {}", self.reopened_states.separated_string())?;
        writeln!(f, "total expanded: {}", self.expanded().separated_string())?;
        write!(f, "total explored: {}", self.explored().separated_string())
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Expanded: {}", self.expanded().separated_string())?;
        writeln!(f, "Explored: {}", self.explored().separated_string())?;
        writeln!(f, "Created: {}", self.total_created().separated_string())?;
        writeln!(f, "Reached duplicates: {}", self.total_duplicates().separated_string())?;
        writeln!(f, "Reopened: {}", self.reopened_states.separated_string())
    }
}
