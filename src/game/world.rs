//! # World Module
//!
//! The tile grid an arena round is played on.

use crate::{FireError, FireResult, TilePos};
use serde::{Deserialize, Serialize};

/// What occupies a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileType {
    #[default]
    Empty,
    BreakableWall,
    UnbreakableWall,
}

impl TileType {
    /// Whether players can stand on this tile.
    pub fn is_passable(self) -> bool {
        self == TileType::Empty
    }
}

/// One cell of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub position: TilePos,
    pub tile_type: TileType,
}

impl Tile {
    /// Creates an empty tile at `position`.
    pub fn empty(position: TilePos) -> Self {
        Self {
            position,
            tile_type: TileType::Empty,
        }
    }
}

/// Fixed-size tile matrix for one round.
///
/// Dimensions never change after construction; tiles are stored row-major and
/// addressed by integer coordinates. Out-of-range lookups return `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Creates a grid with every tile empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use playing_with_fire::{Grid, TilePos, TileType};
    ///
    /// let grid = Grid::new(5, 4);
    /// assert_eq!(grid.width(), 5);
    /// assert_eq!(grid.tile_type(TilePos::new(4, 3)), Some(TileType::Empty));
    /// assert_eq!(grid.tile_type(TilePos::new(5, 0)), None);
    /// ```
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let tiles = (0..height)
            .flat_map(|y| (0..width).map(move |x| Tile::empty(TilePos::new(x, y))))
            .collect();
        Self {
            width,
            height,
            tiles,
        }
    }

    /// Builds a grid from text rows: `#` unbreakable, `+` breakable, anything
    /// else empty. Rows must all have the same length.
    pub fn from_rows(rows: &[&str]) -> FireResult<Self> {
        let height = rows.len() as i32;
        let width = rows.first().map_or(0, |row| row.chars().count()) as i32;
        let mut grid = Self::new(width, height);

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() as i32 != width {
                return Err(FireError::InvalidState(format!(
                    "Row {} has length {}, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            for (x, symbol) in row.chars().enumerate() {
                let tile_type = match symbol {
                    '#' => TileType::UnbreakableWall,
                    '+' => TileType::BreakableWall,
                    _ => TileType::Empty,
                };
                grid.set_tile_type(TilePos::new(x as i32, y as i32), tile_type);
            }
        }

        Ok(grid)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Checks whether a coordinate lies inside the grid.
    pub fn in_bounds(&self, pos: TilePos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// Whether `pos` lies on the outer ring.
    pub fn is_border(&self, pos: TilePos) -> bool {
        self.in_bounds(pos)
            && (pos.x == 0 || pos.y == 0 || pos.x == self.width - 1 || pos.y == self.height - 1)
    }

    fn index(&self, pos: TilePos) -> Option<usize> {
        if self.in_bounds(pos) {
            Some((pos.y * self.width + pos.x) as usize)
        } else {
            None
        }
    }

    pub fn get(&self, pos: TilePos) -> Option<&Tile> {
        self.index(pos).map(|index| &self.tiles[index])
    }

    pub fn get_mut(&mut self, pos: TilePos) -> Option<&mut Tile> {
        self.index(pos).map(move |index| &mut self.tiles[index])
    }

    /// Tile type at `pos`, or `None` when out of range.
    pub fn tile_type(&self, pos: TilePos) -> Option<TileType> {
        self.get(pos).map(|tile| tile.tile_type)
    }

    /// Sets the tile type at `pos`. Returns false when `pos` is out of range.
    pub fn set_tile_type(&mut self, pos: TilePos, tile_type: TileType) -> bool {
        match self.get_mut(pos) {
            Some(tile) => {
                tile.tile_type = tile_type;
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self, pos: TilePos) -> bool {
        self.tile_type(pos) == Some(TileType::Empty)
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub(crate) fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.iter_mut()
    }

    /// Number of tiles of the given type.
    pub fn count(&self, tile_type: TileType) -> usize {
        self.tiles
            .iter()
            .filter(|tile| tile.tile_type == tile_type)
            .count()
    }
}
