//! Performance tests for the planner and the tick loop

use playing_with_fire::config::SIM_DT;
use playing_with_fire::{classify, route, CostTable, Engine, FireResult, Position};
use std::time::Instant;

#[test]
fn test_planner_performance() -> FireResult<()> {
    let engine = Engine::standard_match(12345)?;
    let state = engine.state();
    let bot = &state.players[1];

    let start = Instant::now();
    let iterations = 1000;

    for _ in 0..iterations {
        let map = classify(bot, &state);
        let _ = route(&map, bot.position, 'e', &CostTable::ENEMY);
        let _ = route(&map, Position::new(1.5, 1.5), '+', &CostTable::BREAKABLE_WALL);
    }

    let elapsed = start.elapsed();
    let per_iteration = elapsed / iterations;

    println!("Planner performance: {:?} per classify + 2 routes", per_iteration);

    // Should comfortably fit inside a 60 Hz tick
    assert!(
        per_iteration.as_millis() < 5,
        "Planning too slow: {:?} per iteration",
        per_iteration
    );

    Ok(())
}

#[test]
fn test_tick_performance() -> FireResult<()> {
    let mut engine = Engine::standard_match(54321)?;

    let start = Instant::now();
    let ticks = 600;
    for _ in 0..ticks {
        engine.update(SIM_DT);
    }
    let per_tick = start.elapsed() / ticks;

    println!("Tick performance: {:?} per tick", per_tick);
    assert!(per_tick.as_millis() < 16, "Tick too slow: {:?}", per_tick);

    Ok(())
}
