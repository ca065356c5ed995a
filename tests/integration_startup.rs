//! Integration test to ensure a standard match can start and run without errors.

use playing_with_fire::config::*;
use playing_with_fire::{
    reserved_spawn_tiles, Engine, FireResult, FixedStepRunner, GameState, TileType,
};

#[test]
fn test_basic_startup() -> FireResult<()> {
    let engine = Engine::standard_match(12345)?;
    let grid = engine.grid();

    assert_eq!(grid.width(), GRID_WIDTH);
    assert_eq!(grid.height(), GRID_HEIGHT);
    assert_eq!(grid.count(TileType::BreakableWall), BREAKABLE_WALLS);
    assert_eq!(engine.round(), 1);
    assert!(engine.winner().is_none());

    let names: Vec<&str> = engine.players().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Player 1", "Bot 1"]);

    // Verify both players stand inside their reserved pockets
    let reserved = reserved_spawn_tiles(GRID_WIDTH, GRID_HEIGHT);
    for player in engine.players() {
        assert!(reserved.contains(&player.tile()));
        assert_eq!(grid.tile_type(player.tile()), Some(TileType::Empty));
        assert_eq!(player.hp, STARTING_HP);
    }

    Ok(())
}

#[test]
fn test_snapshot_exports_as_json() -> FireResult<()> {
    let engine = Engine::standard_match(5)?;
    let state = engine.state();

    let json = state.to_json()?;
    let restored = GameState::from_json(&json)?;
    assert_eq!(restored, state);
    Ok(())
}

#[test]
fn test_bot_match_keeps_invariants() -> FireResult<()> {
    let mut engine = Engine::standard_match(2024)?;
    let human = engine.players()[0].id;
    engine.set_behavior(human, Some(playing_with_fire::BehaviorKind::Chase));

    let mut runner = FixedStepRunner::new();
    while !engine.is_match_over() && runner.elapsed() < 60.0 {
        runner.advance(&mut engine, SIM_DT);

        for player in engine.players() {
            assert!((0..=STARTING_HP).contains(&player.hp));
            assert!(engine.grid().in_bounds(player.tile()));
            assert!(player.wins <= WIN_THRESHOLD);
        }
        for bomb in engine.bombs() {
            assert!(bomb.remaining_time > 0.0);
        }
    }

    assert!(runner.ticks() > 0);
    Ok(())
}

#[test]
fn test_same_seed_same_match() -> FireResult<()> {
    let mut first = Engine::standard_match(77)?;
    let mut second = Engine::standard_match(77)?;
    assert_eq!(first.grid(), second.grid());

    for _ in 0..600 {
        first.update(SIM_DT);
        second.update(SIM_DT);
    }

    assert_eq!(first.state(), second.state());
    Ok(())
}
