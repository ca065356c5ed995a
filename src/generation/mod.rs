//! # Generation Module
//!
//! Procedural arena generation.
//!
//! An arena is a walled rectangle with a pocket of guaranteed-empty tiles in each
//! corner for spawning, and a shuffled scatter of unbreakable and breakable walls
//! everywhere else. Generation is driven by an explicit seeded RNG so every round
//! of a match, and every test scenario, can be reproduced.

use crate::config::{BREAKABLE_WALLS, GRID_HEIGHT, GRID_WIDTH, UNBREAKABLE_WALLS};
use crate::{FireError, FireResult, Grid, TilePos, TileType};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Smallest width/height that still has an interior.
pub const MIN_GRID_DIMENSION: i32 = 3;

/// Configuration for arena generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Arena width in tiles, border included
    pub width: i32,
    /// Arena height in tiles, border included
    pub height: i32,
    /// Breakable walls to place
    pub breakable_walls: usize,
    /// Unbreakable walls to place inside the border
    pub unbreakable_walls: usize,
}

impl GenerationConfig {
    /// Creates a configuration for the standard match arena.
    ///
    /// # Examples
    ///
    /// ```
    /// use playing_with_fire::GenerationConfig;
    ///
    /// let config = GenerationConfig::standard(7);
    /// assert_eq!((config.width, config.height), (17, 12));
    /// ```
    pub fn standard(seed: u64) -> Self {
        Self {
            seed,
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            breakable_walls: BREAKABLE_WALLS,
            unbreakable_walls: UNBREAKABLE_WALLS,
        }
    }

    /// Creates a configuration for an arbitrary arena.
    pub fn new(
        width: i32,
        height: i32,
        breakable_walls: usize,
        unbreakable_walls: usize,
        seed: u64,
    ) -> Self {
        Self {
            seed,
            width,
            height,
            breakable_walls,
            unbreakable_walls,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::standard(42)
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> FireResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> FireResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Builds arena grids.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapGenerator;

impl MapGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Generator<Grid> for MapGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> FireResult<Grid> {
        if config.width < MIN_GRID_DIMENSION || config.height < MIN_GRID_DIMENSION {
            return Err(FireError::GenerationFailed(format!(
                "Arena {}x{} is smaller than {}x{}",
                config.width, config.height, MIN_GRID_DIMENSION, MIN_GRID_DIMENSION
            )));
        }

        let mut grid = Grid::new(config.width, config.height);
        for tile in grid.tiles_mut() {
            let pos = tile.position;
            if pos.x == 0 || pos.y == 0 || pos.x == config.width - 1 || pos.y == config.height - 1
            {
                tile.tile_type = TileType::UnbreakableWall;
            }
        }

        let reserved = reserved_spawn_tiles(config.width, config.height);
        let mut candidates: Vec<TilePos> = grid
            .tiles()
            .filter(|tile| tile.tile_type == TileType::Empty && !reserved.contains(&tile.position))
            .map(|tile| tile.position)
            .collect();
        candidates.shuffle(rng);

        let unbreakable = config.unbreakable_walls.min(candidates.len());
        let breakable = config
            .breakable_walls
            .min(candidates.len() - unbreakable);

        for &pos in &candidates[..unbreakable] {
            grid.set_tile_type(pos, TileType::UnbreakableWall);
        }
        for &pos in &candidates[unbreakable..unbreakable + breakable] {
            grid.set_tile_type(pos, TileType::BreakableWall);
        }

        log::debug!(
            "Generated {}x{} arena: {} unbreakable, {} breakable ({} candidates)",
            config.width,
            config.height,
            unbreakable,
            breakable,
            candidates.len()
        );

        self.validate(&grid, config)?;
        Ok(grid)
    }

    fn validate(&self, grid: &Grid, config: &GenerationConfig) -> FireResult<()> {
        if grid.width() != config.width || grid.height() != config.height {
            return Err(FireError::GenerationFailed(
                "Grid dimensions do not match the configuration".to_string(),
            ));
        }

        if let Some(tile) = grid.tiles().find(|tile| {
            grid.is_border(tile.position) && tile.tile_type != TileType::UnbreakableWall
        }) {
            return Err(FireError::GenerationFailed(format!(
                "Border tile {:?} is not walled",
                tile.position
            )));
        }

        for pos in reserved_spawn_tiles(config.width, config.height) {
            if grid.in_bounds(pos) && !grid.is_border(pos) && !grid.is_empty(pos) {
                return Err(FireError::GenerationFailed(format!(
                    "Spawn tile {:?} is blocked",
                    pos
                )));
            }
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "MapGenerator"
    }
}

/// The corner tiles players spawn on: top-left, top-right, bottom-left, bottom-right.
pub fn spawn_corners(width: i32, height: i32) -> [TilePos; 4] {
    [
        TilePos::new(1, 1),
        TilePos::new(width - 2, 1),
        TilePos::new(1, height - 2),
        TilePos::new(width - 2, height - 2),
    ]
}

/// Tiles kept free of walls around each spawn corner.
///
/// Each corner reserves an L-shaped pocket: the corner tile plus two tiles along
/// each wall, which leaves room to drop a bomb and step out of its cross.
pub fn reserved_spawn_tiles(width: i32, height: i32) -> HashSet<TilePos> {
    let inward = [
        (1, 1),
        (-1, 1),
        (1, -1),
        (-1, -1),
    ];

    spawn_corners(width, height)
        .into_iter()
        .zip(inward)
        .flat_map(|(corner, (dx, dy))| {
            [
                corner,
                TilePos::new(corner.x + dx, corner.y),
                TilePos::new(corner.x + 2 * dx, corner.y),
                TilePos::new(corner.x, corner.y + dy),
                TilePos::new(corner.x, corner.y + 2 * dy),
            ]
        })
        .collect()
}

/// Creates a seeded random number generator from the config.
pub fn create_rng(config: &GenerationConfig) -> StdRng {
    StdRng::seed_from_u64(config.seed)
}

/// Generates an arena in one call.
///
/// With `seed` set the result is reproducible; without it the arena is drawn
/// from OS entropy.
pub fn generate_grid(
    width: i32,
    height: i32,
    breakable_walls: usize,
    unbreakable_walls: usize,
    seed: Option<u64>,
) -> FireResult<Grid> {
    let seed = seed.unwrap_or_else(rand::random);
    let config = GenerationConfig::new(width, height, breakable_walls, unbreakable_walls, seed);
    MapGenerator::new().generate(&config, &mut create_rng(&config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_config_creation() {
        let config = GenerationConfig::standard(12345);
        assert_eq!(config.seed, 12345);
        assert_eq!(config.breakable_walls, BREAKABLE_WALLS);
        assert_eq!(config.unbreakable_walls, UNBREAKABLE_WALLS);
    }

    #[test]
    fn test_standard_arena() {
        let config = GenerationConfig::standard(12345);
        let grid = MapGenerator::new()
            .generate(&config, &mut create_rng(&config))
            .unwrap();

        let border = 2 * (GRID_WIDTH + GRID_HEIGHT) as usize - 4;
        assert_eq!(grid.count(TileType::UnbreakableWall), border + UNBREAKABLE_WALLS);
        assert_eq!(grid.count(TileType::BreakableWall), BREAKABLE_WALLS);
        for pos in reserved_spawn_tiles(GRID_WIDTH, GRID_HEIGHT) {
            assert!(grid.is_empty(pos), "spawn tile {:?} blocked", pos);
        }
    }

    #[test]
    fn test_same_seed_same_arena() {
        let a = generate_grid(17, 12, 55, 33, Some(99)).unwrap();
        let b = generate_grid(17, 12, 55, 33, Some(99)).unwrap();
        let c = generate_grid(17, 12, 55, 33, Some(100)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_overfull_request_places_what_fits() {
        let grid = generate_grid(7, 7, 500, 500, Some(1)).unwrap();
        // 25 interior tiles; the four pockets overlap on a 7x7 arena
        let reserved_interior = reserved_spawn_tiles(7, 7)
            .into_iter()
            .filter(|pos| grid.in_bounds(*pos) && !grid.is_border(*pos))
            .count();
        let free = 25 - reserved_interior;
        assert_eq!(grid.count(TileType::UnbreakableWall), 24 + free);
        assert_eq!(grid.count(TileType::BreakableWall), 0);
        assert_eq!(grid.count(TileType::Empty), reserved_interior);
    }

    #[test]
    fn test_too_small_arena_fails() {
        assert!(generate_grid(2, 10, 0, 0, Some(1)).is_err());
    }

    #[test]
    fn test_reserved_tiles_are_pockets() {
        let reserved = reserved_spawn_tiles(17, 12);
        assert_eq!(reserved.len(), 20);
        assert!(reserved.contains(&TilePos::new(1, 1)));
        assert!(reserved.contains(&TilePos::new(3, 1)));
        assert!(reserved.contains(&TilePos::new(15, 10)));
        assert!(reserved.contains(&TilePos::new(15, 8)));
        assert!(reserved.contains(&TilePos::new(13, 10)));
    }

    #[test]
    fn test_generator_type() {
        assert_eq!(MapGenerator::new().generator_type(), "MapGenerator");
    }
}
