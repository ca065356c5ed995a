//! Property tests for arena generation and the route planner.

use pathfinding::prelude::dijkstra;
use playing_with_fire::{
    generate_grid, reserved_spawn_tiles, route, CostTable, DangerMap, Move, Position, TilePos,
    TileType,
};
use proptest::prelude::*;

const SYMBOLS: [char; 8] = ['#', '+', '.', 'p', 'e', 'b', 'x', '*'];

const TABLES: [CostTable; 5] = [
    CostTable::AVOID_DANGER,
    CostTable::POWER_UP,
    CostTable::BREAKABLE_WALL,
    CostTable::ENEMY,
    CostTable::ESCAPE,
];

fn step(tile: TilePos, next: Move) -> TilePos {
    match next.direction() {
        Some(direction) => tile.step(direction),
        None => tile,
    }
}

fn map_strategy() -> impl Strategy<Value = (usize, Vec<String>)> {
    (2usize..10, 2usize..10).prop_flat_map(|(width, height)| {
        let row = proptest::collection::vec(proptest::sample::select(SYMBOLS.to_vec()), width)
            .prop_map(|symbols| symbols.into_iter().collect::<String>());
        (Just(width), proptest::collection::vec(row, height))
    })
}

proptest! {
    #[test]
    fn generated_grids_keep_border_and_spawns(
        width in 3i32..25,
        height in 3i32..20,
        breakable in 0usize..200,
        unbreakable in 0usize..200,
        seed in any::<u64>(),
    ) {
        let grid = generate_grid(width, height, breakable, unbreakable, Some(seed)).unwrap();

        for tile in grid.tiles() {
            if grid.is_border(tile.position) {
                prop_assert_eq!(tile.tile_type, TileType::UnbreakableWall);
            }
        }
        for pos in reserved_spawn_tiles(width, height) {
            if grid.in_bounds(pos) && !grid.is_border(pos) {
                prop_assert!(grid.is_empty(pos));
            }
        }
        prop_assert!(grid.count(TileType::BreakableWall) <= breakable);
    }

    #[test]
    fn routes_avoid_impassable_and_are_cheapest(
        (width, rows) in map_strategy(),
        start_x in 0usize..10,
        start_y in 0usize..10,
        target in proptest::sample::select(SYMBOLS.to_vec()),
        table in 0usize..TABLES.len(),
    ) {
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        let map = DangerMap::from_rows(&rows).unwrap();
        let costs = TABLES[table];
        let start = TilePos::new((start_x % width) as i32, (start_y % rows.len()) as i32);

        let planned = route(&map, start.center(), target, &costs);
        let reference = dijkstra(
            &start,
            |tile| {
                tile.neighbors()
                    .into_iter()
                    .filter_map(|next| {
                        let cost = costs.cost(map.get(next)?);
                        (cost >= 0).then_some((next, cost as u32))
                    })
                    .collect::<Vec<_>>()
            },
            |tile| map.get(*tile) == Some(target),
        );

        prop_assert_eq!(planned.is_some(), reference.is_some());
        if let (Some(moves), Some((_, best))) = (planned, reference) {
            let mut tile = start;
            let mut total = 0u32;
            for next in moves {
                tile = step(tile, next);
                let symbol = map.get(tile);
                prop_assert!(symbol.is_some());
                let cost = costs.cost(symbol.unwrap());
                prop_assert!(cost >= 0, "stepped onto impassable {:?}", symbol);
                total += cost as u32;
            }
            prop_assert_eq!(map.get(tile), Some(target));
            prop_assert_eq!(total, best);
        }
    }

    #[test]
    fn straight_corridor_takes_exactly_n_moves(length in 1usize..15) {
        let row = format!("#.{}p#", ".".repeat(length - 1));
        let wall = "#".repeat(row.len());
        let map = DangerMap::from_rows(&[wall.as_str(), row.as_str(), wall.as_str()]).unwrap();

        let moves = route(&map, Position::new(1.5, 1.5), 'p', &CostTable::POWER_UP).unwrap();
        prop_assert_eq!(moves, vec![Move::Right; length]);
    }
}
