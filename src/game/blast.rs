//! # Blast Propagation
//!
//! The single rule deciding which tiles a detonating bomb reaches. The engine
//! applies it for real; the danger classifier runs the same rule as a dry run.

use crate::{Direction, Grid, SegmentKind, TilePos, TileType};

/// Order in which blast arms are traced.
pub const BLAST_DIRECTIONS: [Direction; 4] = [
    Direction::Right,
    Direction::Left,
    Direction::Up,
    Direction::Down,
];

/// One tile reached by a blast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlastCell {
    pub tile: TilePos,
    /// Arm of the blast, `None` for the origin
    pub direction: Option<Direction>,
    pub segment: SegmentKind,
    /// The tile holds a breakable wall that this blast destroys
    pub breaks_wall: bool,
}

/// Traces a blast of `range` tiles from `origin` without touching the grid.
///
/// Each arm stops before an unbreakable wall or the grid edge, and stops on (and
/// includes) a breakable wall. The last tile of every arm is an `Outer` segment.
///
/// # Examples
///
/// ```
/// use playing_with_fire::{propagate, Grid, TilePos};
///
/// let grid = Grid::from_rows(&["#####", "#...#", "#####"]).unwrap();
/// let cells = propagate(&grid, TilePos::new(2, 1), 5);
/// // origin plus one tile left and one tile right
/// assert_eq!(cells.len(), 3);
/// ```
pub fn propagate(grid: &Grid, origin: TilePos, range: u32) -> Vec<BlastCell> {
    let mut cells = vec![BlastCell {
        tile: origin,
        direction: None,
        segment: SegmentKind::Center,
        breaks_wall: false,
    }];

    for direction in BLAST_DIRECTIONS {
        let arm_start = cells.len();

        for distance in 1..=range as i32 {
            let tile = origin.offset(direction, distance);
            match grid.tile_type(tile) {
                None | Some(TileType::UnbreakableWall) => break,
                Some(TileType::BreakableWall) => {
                    cells.push(BlastCell {
                        tile,
                        direction: Some(direction),
                        segment: SegmentKind::Outer,
                        breaks_wall: true,
                    });
                    break;
                }
                Some(TileType::Empty) => cells.push(BlastCell {
                    tile,
                    direction: Some(direction),
                    segment: SegmentKind::Middle,
                    breaks_wall: false,
                }),
            }
        }

        if cells.len() > arm_start {
            if let Some(last) = cells.last_mut() {
                last.segment = SegmentKind::Outer;
            }
        }
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn open_arena() -> Grid {
        Grid::from_rows(&[
            "###########",
            "#.........#",
            "#.........#",
            "#.........#",
            "#.........#",
            "#.........#",
            "#.........#",
            "#.........#",
            "###########",
        ])
        .unwrap()
    }

    #[test]
    fn test_open_cross() {
        let grid = open_arena();
        let origin = TilePos::new(5, 4);
        let cells = propagate(&grid, origin, 2);
        let tiles: HashSet<TilePos> = cells.iter().map(|cell| cell.tile).collect();

        let mut expected = HashSet::from([origin]);
        for direction in BLAST_DIRECTIONS {
            for distance in 1..=2 {
                expected.insert(origin.offset(direction, distance));
            }
        }
        assert_eq!(tiles, expected);
        assert_eq!(cells.len(), 9);
    }

    #[test]
    fn test_segment_kinds() {
        let grid = open_arena();
        let origin = TilePos::new(5, 4);
        let cells = propagate(&grid, origin, 2);

        assert_eq!(cells[0].segment, SegmentKind::Center);
        assert_eq!(cells[0].direction, None);
        for cell in &cells[1..] {
            let distance = cell.tile.manhattan_distance(origin);
            let expected = if distance == 2 {
                SegmentKind::Outer
            } else {
                SegmentKind::Middle
            };
            assert_eq!(cell.segment, expected, "tile {:?}", cell.tile);
        }
    }

    #[test]
    fn test_unbreakable_wall_stops_arm() {
        let grid = open_arena();
        // (1, 4) is next to the left border
        let cells = propagate(&grid, TilePos::new(1, 4), 3);
        assert!(cells.iter().all(|cell| cell.tile.x >= 1));
        assert!(!cells.iter().any(|cell| cell.direction == Some(Direction::Left)));
    }

    #[test]
    fn test_arm_cut_short_by_wall_ends_outer() {
        let grid = Grid::from_rows(&["#######", "#..#..#", "#######"]).unwrap();
        let cells = propagate(&grid, TilePos::new(1, 1), 4);
        let right: Vec<_> = cells
            .iter()
            .filter(|cell| cell.direction == Some(Direction::Right))
            .collect();
        assert_eq!(right.len(), 1);
        assert_eq!(right[0].tile, TilePos::new(2, 1));
        assert_eq!(right[0].segment, SegmentKind::Outer);
    }

    #[test]
    fn test_breakable_wall_included_and_stops() {
        let grid = Grid::from_rows(&["#######", "#..+..#", "#######"]).unwrap();
        let cells = propagate(&grid, TilePos::new(1, 1), 5);
        let right: Vec<_> = cells
            .iter()
            .filter(|cell| cell.direction == Some(Direction::Right))
            .collect();
        assert_eq!(right.len(), 2);
        assert!(right[1].breaks_wall);
        assert_eq!(right[1].tile, TilePos::new(3, 1));
        assert_eq!(right[1].segment, SegmentKind::Outer);
        assert!(!right[0].breaks_wall);
    }

    #[test]
    fn test_does_not_mutate_grid() {
        let grid = Grid::from_rows(&["#####", "#.+.#", "#####"]).unwrap();
        let before = grid.clone();
        let _ = propagate(&grid, TilePos::new(1, 1), 3);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_zero_range_is_origin_only() {
        let grid = open_arena();
        let cells = propagate(&grid, TilePos::new(4, 4), 0);
        assert_eq!(cells.len(), 1);
    }
}
