//! # Danger-Zone Classification
//!
//! Reduces a snapshot to one symbol per tile for the planner:
//!
//! | symbol | meaning                                   |
//! |--------|-------------------------------------------|
//! | `#`    | unbreakable wall                          |
//! | `+`    | breakable wall                            |
//! | `.`    | empty and safe                            |
//! | `p`    | power-up                                  |
//! | `e`    | another player                            |
//! | `b`    | a bomb's own tile                         |
//! | `x`    | inside the predicted blast of some bomb   |
//! | `*`    | covered by a live explosion               |
//!
//! The map is derived fresh from a snapshot each time it is needed and is never
//! cached or written back.

use crate::{propagate, Bomb, FireError, FireResult, GameState, Player, TilePos, TileType};
use std::fmt;

pub const UNBREAKABLE: char = '#';
pub const BREAKABLE: char = '+';
pub const EMPTY: char = '.';
pub const POWER_UP: char = 'p';
pub const ENEMY: char = 'e';
pub const BOMB: char = 'b';
pub const PREDICTED_BLAST: char = 'x';
pub const EXPLOSION: char = '*';

/// Character-coded hazard map, one symbol per tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DangerMap {
    width: i32,
    height: i32,
    cells: Vec<char>,
}

impl DangerMap {
    /// Creates a map filled with `fill`.
    pub fn filled(width: i32, height: i32, fill: char) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![fill; (width * height) as usize],
        }
    }

    /// Parses a map from text rows of equal length.
    pub fn from_rows(rows: &[&str]) -> FireResult<Self> {
        let height = rows.len() as i32;
        let width = rows.first().map_or(0, |row| row.chars().count()) as i32;
        let mut cells = Vec::with_capacity((width * height) as usize);

        for (y, row) in rows.iter().enumerate() {
            let before = cells.len();
            cells.extend(row.chars());
            if (cells.len() - before) as i32 != width {
                return Err(FireError::InvalidState(format!(
                    "Danger map row {} has the wrong length",
                    y
                )));
            }
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn in_bounds(&self, tile: TilePos) -> bool {
        tile.x >= 0 && tile.y >= 0 && tile.x < self.width && tile.y < self.height
    }

    /// Row-major index of `tile`, or `None` when out of range.
    pub fn index(&self, tile: TilePos) -> Option<usize> {
        self.in_bounds(tile)
            .then(|| (tile.y * self.width + tile.x) as usize)
    }

    pub fn get(&self, tile: TilePos) -> Option<char> {
        self.index(tile).map(|index| self.cells[index])
    }

    /// Whether `tile` shows one of `symbols`.
    pub fn is_any(&self, tile: TilePos, symbols: &[char]) -> bool {
        self.get(tile).is_some_and(|symbol| symbols.contains(&symbol))
    }

    pub fn set(&mut self, tile: TilePos, symbol: char) {
        if let Some(index) = self.index(tile) {
            self.cells[index] = symbol;
        }
    }

    fn is_wall(&self, tile: TilePos) -> bool {
        self.is_any(tile, &[UNBREAKABLE, BREAKABLE])
    }
}

impl fmt::Display for DangerMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1) as usize) {
            let line: String = row.iter().collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Classifies every tile of `state` as seen by `observer`.
pub fn classify(observer: &Player, state: &GameState) -> DangerMap {
    classify_with_bombs(observer, state, &state.bombs)
}

/// Like [`classify`], but predicts blasts for `bombs` instead of the snapshot's
/// own bomb list. Used to ask "what if a bomb were placed here?" without
/// touching the snapshot.
pub fn classify_with_bombs(observer: &Player, state: &GameState, bombs: &[Bomb]) -> DangerMap {
    let grid = &state.grid;
    let mut map = DangerMap::filled(grid.width(), grid.height(), EMPTY);

    for tile in grid.tiles() {
        let symbol = match tile.tile_type {
            TileType::UnbreakableWall => UNBREAKABLE,
            TileType::BreakableWall => BREAKABLE,
            TileType::Empty => EMPTY,
        };
        map.set(tile.position, symbol);
    }

    for power_up in &state.power_ups {
        if map.get(power_up.tile) == Some(EMPTY) {
            map.set(power_up.tile, POWER_UP);
        }
    }

    for other in state.opponents_of(observer.id) {
        let tile = other.tile();
        if map.in_bounds(tile) && !map.is_wall(tile) {
            map.set(tile, ENEMY);
        }
    }

    for bomb in bombs {
        map.set(bomb.tile, BOMB);
        for cell in propagate(grid, bomb.tile, bomb.range).into_iter().skip(1) {
            if !map.is_wall(cell.tile) {
                map.set(cell.tile, PREDICTED_BLAST);
            }
        }
    }

    // A later bomb's prediction must not hide an earlier bomb.
    for bomb in bombs {
        map.set(bomb.tile, BOMB);
    }

    for explosion in &state.explosions {
        map.set(explosion.tile, EXPLOSION);
    }

    map
}
