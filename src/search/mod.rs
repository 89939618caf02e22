//! Grid Search Engine
//!
//! Three classic search strategies over an implicit, unweighted,
//! 4-connected 11x11 integer grid:
//!
//! - Breadth-first (FIFO frontier, shortest path in edge count)
//! - Depth-first (LIFO frontier, no optimality guarantee)
//! - Greedy best-first (frontier ordered by Manhattan distance to goal)
//!
//! No adjacency structure is materialized; neighbors are generated on
//! demand and clamped to the grid bounds. Each strategy returns the
//! located goal state or `None` - "not found" is a valid result
//! variant, not a failure, though with clamped coordinates the whole
//! grid is reachable from any interior start.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

/// Inclusive lower bound of each grid coordinate.
pub const GRID_MIN: i32 = 0;
/// Inclusive upper bound of each grid coordinate.
pub const GRID_MAX: i32 = 10;

// ============================================================================
// Grid State
// ============================================================================

/// A node in the implicit grid: a (food-level, service-level) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridState {
    pub food: i32,
    pub service: i32,
}

impl GridState {
    /// Create a state with both coordinates clamped to the grid bounds.
    pub fn new(food: i32, service: i32) -> Self {
        Self {
            food: food.clamp(GRID_MIN, GRID_MAX),
            service: service.clamp(GRID_MIN, GRID_MAX),
        }
    }

    /// The four candidate neighbors, each clamped independently.
    ///
    /// Order is fixed (+food, -food, +service, -service); DFS exploration
    /// order depends on it. Boundary states yield self-referential
    /// duplicates, which the visited set absorbs.
    pub fn neighbors(&self) -> [GridState; 4] {
        [
            GridState::new(self.food + 1, self.service),
            GridState::new(self.food - 1, self.service),
            GridState::new(self.food, self.service + 1),
            GridState::new(self.food, self.service - 1),
        ]
    }

    /// Manhattan distance to another state, the greedy search heuristic.
    pub fn manhattan(&self, other: &GridState) -> i32 {
        (self.food - other.food).abs() + (self.service - other.service).abs()
    }
}

impl std::fmt::Display for GridState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.food, self.service)
    }
}

// ============================================================================
// Strategies
// ============================================================================

/// Breadth-first search: FIFO frontier, expands in non-decreasing
/// path-length order.
pub fn bfs(start: GridState, goal: GridState) -> Option<GridState> {
    let mut frontier = VecDeque::from([start]);
    let mut visited = HashSet::new();

    while let Some(state) = frontier.pop_front() {
        if !visited.insert(state) {
            continue;
        }
        if state == goal {
            return Some(state);
        }
        for n in state.neighbors() {
            if !visited.contains(&n) {
                frontier.push_back(n);
            }
        }
    }

    None
}

/// Depth-first search: LIFO frontier, later pushes popped first.
pub fn dfs(start: GridState, goal: GridState) -> Option<GridState> {
    let mut frontier = vec![start];
    let mut visited = HashSet::new();

    while let Some(state) = frontier.pop() {
        if !visited.insert(state) {
            continue;
        }
        if state == goal {
            return Some(state);
        }
        for n in state.neighbors() {
            if !visited.contains(&n) {
                frontier.push(n);
            }
        }
    }

    None
}

/// Frontier entry for greedy best-first search.
///
/// `BinaryHeap` is a max-heap, so the ordering is inverted to pop the
/// lowest heuristic first. Ties are broken by insertion order (lower
/// sequence number pops first), which makes expansion deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierEntry {
    heuristic: i32,
    seq: u64,
    state: GridState,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .heuristic
            .cmp(&self.heuristic)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Greedy best-first search: frontier ordered by Manhattan distance to
/// the goal. Purely heuristic-ordered, no cost accumulation, so the
/// result is not guaranteed optimal.
pub fn greedy_best_first(start: GridState, goal: GridState) -> Option<GridState> {
    let mut seq = 0u64;
    let mut frontier = BinaryHeap::new();
    frontier.push(FrontierEntry {
        heuristic: 0,
        seq,
        state: start,
    });
    let mut visited = HashSet::new();

    while let Some(entry) = frontier.pop() {
        let state = entry.state;
        if !visited.insert(state) {
            continue;
        }
        if state == goal {
            return Some(state);
        }
        for n in state.neighbors() {
            if !visited.contains(&n) {
                seq += 1;
                frontier.push(FrontierEntry {
                    heuristic: n.manhattan(&goal),
                    seq,
                    state: n,
                });
            }
        }
    }

    None
}

// ============================================================================
// Combined Entry Point
// ============================================================================

/// Outcome of running all three strategies for the same start/goal pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReport {
    pub bfs: Option<GridState>,
    pub dfs: Option<GridState>,
    pub greedy: Option<GridState>,
}

/// Run all three search strategies independently over the same grid.
pub fn run_searches(start: GridState, goal: GridState) -> SearchReport {
    SearchReport {
        bfs: bfs(start, goal),
        dfs: dfs(start, goal),
        greedy: greedy_best_first(start, goal),
    }
}

// ============================================================================
// Tests
// ============================================================================
