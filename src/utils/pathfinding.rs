//! # Pathfinding Algorithms
//!
//! A uniform-cost search over a [`DangerMap`], answering "what is the first step
//! of the cheapest route to the nearest tile showing symbol T?".
//!
//! The same search serves every goal of the bot; only the [`CostTable`] changes.
//! A negative cost makes a symbol impassable, a non-negative cost is the price of
//! stepping onto a tile showing it.

use crate::ai::danger;
use crate::config::ESCAPE_ROUTE_LIMIT;
use crate::{DangerMap, Direction, Move, Position, TilePos};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Price of stepping onto each danger-map symbol. Negative means impassable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostTable {
    pub unbreakable: i32,
    pub explosion: i32,
    pub bomb: i32,
    pub enemy: i32,
    pub breakable: i32,
    pub predicted_blast: i32,
    pub empty: i32,
    pub power_up: i32,
}

impl CostTable {
    /// Flee toward safety: walls block, hazards are discouraged, enemies strongly so.
    pub const AVOID_DANGER: CostTable = CostTable {
        unbreakable: -1,
        explosion: 3,
        bomb: 3,
        enemy: 10,
        breakable: -1,
        predicted_blast: 1,
        empty: 1,
        power_up: 1,
    };

    /// Fetch a power-up; crossing a predicted blast is a last resort.
    pub const POWER_UP: CostTable = CostTable {
        unbreakable: -1,
        explosion: -1,
        bomb: -1,
        enemy: 1,
        breakable: 3,
        predicted_blast: 30,
        empty: 1,
        power_up: 1,
    };

    /// Walk up to a breakable wall.
    pub const BREAKABLE_WALL: CostTable = CostTable {
        unbreakable: -1,
        explosion: -1,
        bomb: -1,
        enemy: 3,
        breakable: 3,
        predicted_blast: -1,
        empty: 1,
        power_up: 1,
    };

    /// Hunt the nearest opponent.
    pub const ENEMY: CostTable = CostTable {
        unbreakable: -1,
        explosion: -1,
        bomb: -1,
        enemy: 1,
        breakable: 3,
        predicted_blast: -1,
        empty: 1,
        power_up: 1,
    };

    /// Reachability test only: can a safe tile be reached at all?
    pub const ESCAPE: CostTable = CostTable {
        unbreakable: -1,
        explosion: 10,
        bomb: 10,
        enemy: -1,
        breakable: -1,
        predicted_blast: 10,
        empty: 1,
        power_up: 1,
    };

    /// Cost of stepping onto `symbol`. Unknown symbols are impassable.
    pub fn cost(&self, symbol: char) -> i32 {
        match symbol {
            danger::UNBREAKABLE => self.unbreakable,
            danger::EXPLOSION => self.explosion,
            danger::BOMB => self.bomb,
            danger::ENEMY => self.enemy,
            danger::BREAKABLE => self.breakable,
            danger::PREDICTED_BLAST => self.predicted_blast,
            danger::EMPTY => self.empty,
            danger::POWER_UP => self.power_up,
            _ => -1,
        }
    }
}

/// Frontier entry for the uniform-cost search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SearchNode {
    cost: u32,
    tile: TilePos,
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior in BinaryHeap
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.tile.cmp(&self.tile))
    }
}

/// Finds the cheapest route from `start` to the nearest tile showing `target`.
///
/// Returns the moves in walking order; `Some(vec![])` when `start` already shows
/// `target`, and `None` when no such tile is reachable. Only the first move is
/// meant to be acted on before the next replan.
///
/// # Examples
///
/// ```
/// use playing_with_fire::{route, CostTable, DangerMap, Move, Position};
///
/// let map = DangerMap::from_rows(&["#####", "#..p#", "#####"]).unwrap();
/// let moves = route(&map, Position::new(1.5, 1.5), 'p', &CostTable::POWER_UP).unwrap();
/// assert_eq!(moves, vec![Move::Right, Move::Right]);
/// ```
pub fn route(
    map: &DangerMap,
    start: Position,
    target: char,
    costs: &CostTable,
) -> Option<Vec<Move>> {
    let start = start.tile();
    if !map.in_bounds(start) {
        return None;
    }

    let mut distances: Vec<Option<u32>> = vec![None; map.len()];
    distances[map.index(start)?] = Some(0);

    let mut frontier = BinaryHeap::new();
    frontier.push(SearchNode {
        cost: 0,
        tile: start,
    });

    while let Some(SearchNode { cost, tile }) = frontier.pop() {
        if map.get(tile) == Some(target) {
            return backtrack(map, &distances, tile, costs);
        }

        for next in tile.neighbors() {
            let Some(symbol) = map.get(next) else {
                continue;
            };
            let step = costs.cost(symbol);
            if step < 0 {
                continue;
            }

            let candidate = cost + step as u32;
            let index = map.index(next)?;
            if distances[index].is_some_and(|known| candidate >= known) {
                continue;
            }
            distances[index] = Some(candidate);
            frontier.push(SearchNode {
                cost: candidate,
                tile: next,
            });
        }
    }

    None
}

/// Walks back from `goal` to the start through tiles whose distance plus the
/// current tile's cost equals the current distance.
fn backtrack(
    map: &DangerMap,
    distances: &[Option<u32>],
    goal: TilePos,
    costs: &CostTable,
) -> Option<Vec<Move>> {
    let distance_at = |tile: TilePos| map.index(tile).and_then(|index| distances[index]);

    let mut current = goal;
    let mut moves = Vec::new();

    while let Some(current_distance) = distance_at(current).filter(|&distance| distance > 0) {
        let step = costs.cost(map.get(current)?);
        if step <= 0 {
            return None;
        }

        let previous = Direction::ALL.into_iter().find_map(|direction| {
            let next = current.step(direction);
            let known = distance_at(next)?;
            (known + step as u32 == current_distance).then_some((next, direction))
        });

        // A well-formed distance table always has a predecessor.
        let (next, direction) = previous?;
        current = next;
        moves.push(Move::from(direction.opposite()));
    }

    moves.reverse();
    Some(moves)
}

/// Whether a safe tile is reachable from `from` within the escape limit.
pub fn can_escape(map: &DangerMap, from: Position) -> bool {
    route(map, from, danger::EMPTY, &CostTable::ESCAPE)
        .is_some_and(|moves| moves.len() <= ESCAPE_ROUTE_LIMIT)
}
