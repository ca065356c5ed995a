//! # Game Engine
//!
//! The single owner and mutator of live match state.
//!
//! Each call to [`Engine::update`] runs one tick in a fixed order: drain queued
//! input, age bombs (detonating expired ones), age explosions, move and collide
//! players, then settle the round. Readers only ever see a [`GameState`] copy
//! taken between ticks.

use crate::config::*;
use crate::{
    occupied_tile, propagate, seeded_player_id, spawn_corners, Behavior, BehaviorKind, Bomb,
    BombId, Direction, Explosion, FireResult, GameEvent, GameState, GenerationConfig, Generator,
    Grid, InputEvent, InputQueue, MapGenerator, Move, Player, PlayerId, PlayerState, Position,
    PowerUp, PowerUpType, SegmentKind, TilePos, TileType,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Where each round's grid comes from.
#[derive(Debug, Clone)]
enum Arena {
    /// Freshly generated every round
    Generated(GenerationConfig),
    /// The same hand-built layout every round
    Fixed(Grid),
}

/// Live simulation of one match.
pub struct Engine {
    grid: Grid,
    players: Vec<Player>,
    bombs: Vec<Bomb>,
    explosions: Vec<Explosion>,
    power_ups: Vec<PowerUp>,
    round: u32,
    winner: Option<PlayerId>,
    arena: Arena,
    rng: StdRng,
    next_bomb_id: u64,
    input: InputQueue,
}

impl Engine {
    /// Creates an engine with a generated arena and no players.
    pub fn new(config: GenerationConfig) -> FireResult<Self> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let grid = MapGenerator::new().generate(&config, &mut rng)?;
        Ok(Self::with_arena(grid, Arena::Generated(config), rng))
    }

    /// Creates the standard match: a human in the top-left corner and a chasing
    /// bot in the bottom-right corner of a 17x12 arena.
    ///
    /// # Examples
    ///
    /// ```
    /// use playing_with_fire::Engine;
    ///
    /// let engine = Engine::standard_match(7).unwrap();
    /// assert_eq!(engine.players().len(), 2);
    /// assert_eq!(engine.round(), 1);
    /// ```
    pub fn standard_match(seed: u64) -> FireResult<Self> {
        let mut engine = Self::new(GenerationConfig::standard(seed))?;
        let [top_left, _, _, bottom_right] =
            spawn_corners(engine.grid.width(), engine.grid.height());

        let human = Player {
            id: engine.next_player_id(),
            ..Player::new("Player 1".to_string(), top_left.center())
        };
        let bot = Player {
            id: engine.next_player_id(),
            ..Player::autonomous("Bot 1".to_string(), bottom_right.center(), BehaviorKind::Chase)
        };
        engine.spawn_player(human);
        engine.spawn_player(bot);
        Ok(engine)
    }

    /// Draws a player ID from the engine's seeded generator.
    pub fn next_player_id(&mut self) -> PlayerId {
        seeded_player_id(&mut self.rng)
    }

    /// Creates an engine that plays every round on a copy of `grid`.
    pub fn from_grid(grid: Grid, seed: u64) -> Self {
        Self::with_arena(grid.clone(), Arena::Fixed(grid), StdRng::seed_from_u64(seed))
    }

    fn with_arena(grid: Grid, arena: Arena, rng: StdRng) -> Self {
        Self {
            grid,
            players: Vec::new(),
            bombs: Vec::new(),
            explosions: Vec::new(),
            power_ups: Vec::new(),
            round: 1,
            winner: None,
            arena,
            rng,
            next_bomb_id: 0,
            input: InputQueue::new(),
        }
    }

    /// Adds a player to the roster.
    ///
    /// Returns false, changing nothing, when the id is already taken or the
    /// player's tile is not empty.
    pub fn spawn_player(&mut self, player: Player) -> bool {
        if self.players.iter().any(|existing| existing.id == player.id) {
            log::debug!("Rejected duplicate player {}", player.name);
            return false;
        }
        if !self.grid.is_empty(player.tile()) {
            log::debug!("Rejected {} on blocked tile {:?}", player.name, player.tile());
            return false;
        }

        log::debug!("Spawned {} at {:?}", player.name, player.tile());
        self.players.push(player);
        true
    }

    /// Swaps the decision policy of a player; `None` hands it to human input.
    pub fn set_behavior(&mut self, id: PlayerId, behavior: Option<BehaviorKind>) {
        if let Some(player) = self.player_mut(id) {
            player.behavior = behavior;
        }
    }

    /// A handle producers can push input through from any thread.
    pub fn input_queue(&self) -> InputQueue {
        self.input.clone()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    /// Direct access for scenario setup.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|player| player.id == id)
    }

    pub fn bombs(&self) -> &[Bomb] {
        &self.bombs
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    pub fn power_ups(&self) -> &[PowerUp] {
        &self.power_ups
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn is_match_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Value copy of the current state.
    pub fn state(&self) -> GameState {
        GameState {
            grid: self.grid.clone(),
            players: self.players.clone(),
            bombs: self.bombs.clone(),
            explosions: self.explosions.clone(),
            power_ups: self.power_ups.clone(),
            round: self.round,
            winner: self.winner,
        }
    }

    /// Advances the simulation by `delta` seconds.
    ///
    /// Does nothing once a match winner has been recorded.
    pub fn update(&mut self, delta: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let pending = self.input.drain();

        if self.is_match_over() {
            return events;
        }

        for event in pending {
            self.apply_input(event, &mut events);
        }

        self.update_bombs(delta, &mut events);
        self.update_explosions(delta);
        for index in 0..self.players.len() {
            self.update_player(index, delta, &mut events);
        }
        self.check_round_over(&mut events);

        events
    }

    /// Drops a bomb on the player's tile if they have a charge left.
    pub fn place_bomb(&mut self, player_id: PlayerId) -> Option<BombId> {
        let mut events = Vec::new();
        let index = self.players.iter().position(|player| player.id == player_id)?;
        self.place_bomb_at(index, &mut events)
    }

    /// Starts over: tallies cleared, round 1, fresh arena.
    pub fn new_match(&mut self) -> FireResult<()> {
        for player in &mut self.players {
            player.wins = 0;
        }
        self.winner = None;
        self.round = 1;
        self.reset_arena()?;
        log::info!("New match started");
        Ok(())
    }

    fn apply_input(&mut self, event: InputEvent, events: &mut Vec<GameEvent>) {
        let Some(index) = self.players.iter().position(|player| !player.is_autonomous()) else {
            log::trace!("Dropped {:?}: no human player", event);
            return;
        };

        match event {
            InputEvent::DirectionPress(direction) => self.players[index].run(direction),
            InputEvent::DirectionRelease => self.players[index].stop(),
            InputEvent::BombPress => {
                self.place_bomb_at(index, events);
            }
        }
    }

    fn place_bomb_at(&mut self, index: usize, events: &mut Vec<GameEvent>) -> Option<BombId> {
        let player = &mut self.players[index];
        if player.bomb_count == 0 {
            return None;
        }

        let id = BombId(self.next_bomb_id);
        self.next_bomb_id += 1;

        let tile = player.tile();
        player.bomb_count -= 1;
        player.bombs.push(id);
        self.bombs.push(Bomb::new(id, tile, player.fire_range));

        log::debug!("{} placed bomb {:?} at {:?}", player.name, id, tile);
        events.push(GameEvent::BombPlaced {
            player_id: player.id,
            tile,
        });
        Some(id)
    }

    fn update_bombs(&mut self, delta: f64, events: &mut Vec<GameEvent>) {
        let mut expired = Vec::new();
        self.bombs.retain_mut(|bomb| {
            bomb.remaining_time -= delta;
            if bomb.remaining_time <= 0.0 {
                expired.push(bomb.clone());
                false
            } else {
                true
            }
        });

        for bomb in expired {
            self.detonate(bomb, events);
        }
    }

    fn detonate(&mut self, bomb: Bomb, events: &mut Vec<GameEvent>) {
        let cells = propagate(&self.grid, bomb.tile, bomb.range);

        for cell in &cells {
            if cell.breaks_wall {
                self.grid.set_tile_type(cell.tile, TileType::Empty);
                events.push(GameEvent::WallDestroyed { tile: cell.tile });
                self.maybe_spawn_power_up(cell.tile, events);
            }
            self.add_explosion(Explosion::new(cell.tile, cell.direction, cell.segment));
        }

        let owner = self
            .players
            .iter_mut()
            .find(|player| player.bombs.contains(&bomb.id));
        let owner_id = owner.map(|player| {
            player.bombs.retain(|id| *id != bomb.id);
            player.bomb_count += 1;
            player.id
        });

        log::debug!(
            "Bomb {:?} detonated at {:?} covering {} tiles",
            bomb.id,
            bomb.tile,
            cells.len()
        );
        events.push(GameEvent::BombDetonated {
            owner: owner_id,
            tile: bomb.tile,
            affected_tiles: cells.len(),
        });
    }

    /// Adds a blast record, turning a crossed perpendicular arm end into a
    /// middle segment. Both records stay live.
    fn add_explosion(&mut self, explosion: Explosion) {
        if let Some(direction) = explosion.direction {
            for existing in &mut self.explosions {
                let crosses = existing.tile == explosion.tile
                    && existing.segment == SegmentKind::Outer
                    && existing
                        .direction
                        .is_some_and(|other| other.is_perpendicular(direction));
                if crosses {
                    existing.segment = SegmentKind::Middle;
                }
            }
        }
        self.explosions.push(explosion);
    }

    fn maybe_spawn_power_up(&mut self, tile: TilePos, events: &mut Vec<GameEvent>) {
        if !self
            .rng
            .gen_ratio(POWER_UP_CHANCE_NUMERATOR, POWER_UP_CHANCE_DENOMINATOR)
        {
            return;
        }

        if let Some(&kind) = PowerUpType::ALL.choose(&mut self.rng) {
            log::debug!("Spawned {:?} at {:?}", kind, tile);
            self.power_ups.push(PowerUp::new(kind, tile));
            events.push(GameEvent::PowerUpSpawned { kind, tile });
        }
    }

    fn update_explosions(&mut self, delta: f64) {
        self.explosions.retain_mut(|explosion| {
            explosion.remaining_time -= delta;
            explosion.remaining_time > 0.0
        });
    }

    fn update_player(&mut self, index: usize, delta: f64, events: &mut Vec<GameEvent>) {
        if let Some(behavior) = self.players[index].behavior {
            let decision = behavior.decide_move(&self.players[index], &self.state());
            self.apply_move(index, decision, events);
        }

        let probes = if self.players[index].state == PlayerState::Idle {
            let tile = self.players[index].tile();
            [tile, tile]
        } else {
            self.move_player(index, delta)
        };

        self.apply_explosion_damage(index, probes, events);
        self.collect_power_up(index, probes, events);
    }

    fn apply_move(&mut self, index: usize, decision: Move, events: &mut Vec<GameEvent>) {
        match decision {
            Move::Up | Move::Down | Move::Left | Move::Right => {
                if let Some(direction) = decision.direction() {
                    self.players[index].run(direction);
                }
            }
            Move::PlaceBomb => {
                self.place_bomb_at(index, events);
            }
            Move::DoNothing => self.players[index].stop(),
            Move::NoChange => {}
        }
    }

    /// Moves a running player, snapping it back when the move would overlap a
    /// wall. Returns the two probed tiles.
    fn move_player(&mut self, index: usize, delta: f64) -> [TilePos; 2] {
        let player = &self.players[index];
        let radius = player.radius();
        let direction = player.direction;
        let current = player.position;
        let tentative = current.moved(direction, player.speed * delta as f32);

        let probes = probe_tiles(tentative, direction, radius);
        let blocked = probes.iter().any(|&tile| self.is_blocking(tile));

        let position = if blocked {
            snap_back(current, direction, radius)
        } else {
            tentative
        };
        self.players[index].position = position;
        probes
    }

    /// Walls block, and so does anything off the grid.
    fn is_blocking(&self, tile: TilePos) -> bool {
        debug_assert!(self.grid.in_bounds(tile), "collision probe {:?} left the grid", tile);
        self.grid
            .tile_type(tile)
            .map_or(true, |tile_type| !tile_type.is_passable())
    }

    fn apply_explosion_damage(
        &mut self,
        index: usize,
        probes: [TilePos; 2],
        events: &mut Vec<GameEvent>,
    ) {
        let player = &mut self.players[index];
        for explosion in &mut self.explosions {
            if !probes.contains(&explosion.tile) || explosion.has_damaged(player.id) {
                continue;
            }

            explosion.damaged.insert(player.id);
            player.take_damage(EXPLOSION_DAMAGE);
            log::debug!("{} hit at {:?}, {} hp left", player.name, explosion.tile, player.hp);
            events.push(GameEvent::PlayerDamaged {
                player_id: player.id,
                damage: EXPLOSION_DAMAGE,
                remaining_hp: player.hp,
            });
        }
    }

    fn collect_power_up(
        &mut self,
        index: usize,
        probes: [TilePos; 2],
        events: &mut Vec<GameEvent>,
    ) {
        let Some(slot) = self
            .power_ups
            .iter()
            .position(|power_up| probes.contains(&power_up.tile))
        else {
            return;
        };

        let power_up = self.power_ups.remove(slot);
        let player = &mut self.players[index];
        player.apply_power_up(power_up.kind);
        log::debug!("{} collected {:?}", player.name, power_up.kind);
        events.push(GameEvent::PowerUpCollected {
            player_id: player.id,
            kind: power_up.kind,
        });
    }

    fn check_round_over(&mut self, events: &mut Vec<GameEvent>) {
        let fallen: Vec<PlayerId> = self
            .players
            .iter()
            .filter(|player| !player.is_alive())
            .map(|player| player.id)
            .collect();
        if fallen.is_empty() {
            return;
        }

        for loser in &fallen {
            for player in self.players.iter_mut().filter(|player| player.id != *loser) {
                player.wins += 1;
                log::info!("{} wins round {} ({} total)", player.name, self.round, player.wins);
                events.push(GameEvent::RoundWon {
                    winner: player.id,
                    round: self.round,
                });
            }
        }

        if let Some(champion) = self
            .players
            .iter()
            .find(|player| player.wins >= WIN_THRESHOLD)
        {
            log::info!("{} wins the match", champion.name);
            self.winner = Some(champion.id);
            events.push(GameEvent::MatchWon {
                winner: champion.id,
            });
            return;
        }

        self.round += 1;
        if let Err(err) = self.reset_arena() {
            log::error!("Failed to reset arena for round {}: {}", self.round, err);
        }
    }

    /// Rebuilds the grid and puts every player back on their spawn with round
    /// defaults.
    fn reset_arena(&mut self) -> FireResult<()> {
        self.grid = match &self.arena {
            Arena::Generated(config) => MapGenerator::new().generate(config, &mut self.rng)?,
            Arena::Fixed(grid) => grid.clone(),
        };
        self.bombs.clear();
        self.explosions.clear();
        self.power_ups.clear();
        for player in &mut self.players {
            player.reset_for_round();
        }
        log::debug!("Round {} ready", self.round);
        Ok(())
    }
}

/// The leading-edge tile along the movement axis and the tile the body
/// overlaps diagonally.
fn probe_tiles(position: Position, direction: Direction, radius: f32) -> [TilePos; 2] {
    let column = position.x.floor() as i32;
    let row = position.y.floor() as i32;
    let ahead = match direction {
        Direction::Left => TilePos::new((position.x - radius).floor() as i32, row),
        Direction::Right => TilePos::new((position.x + radius).floor() as i32, row),
        Direction::Up => TilePos::new(column, (position.y - radius).floor() as i32),
        Direction::Down => TilePos::new(column, (position.y + radius).floor() as i32),
    };
    let diagonal = TilePos::new(
        occupied_tile(position.x, radius),
        occupied_tile(position.y, radius),
    );
    [ahead, diagonal]
}

/// Places a blocked body flush against the edge of its current tile on the
/// movement axis, keeping the other coordinate.
fn snap_back(current: Position, direction: Direction, radius: f32) -> Position {
    let tile = current.tile();
    let near = radius + COLLISION_EPSILON;
    let far = 1.0 - radius - COLLISION_EPSILON;

    match direction {
        Direction::Up => Position::new(current.x, tile.y as f32 + near),
        Direction::Down => Position::new(current.x, tile.y as f32 + far),
        Direction::Left => Position::new(tile.x as f32 + near, current.y),
        Direction::Right => Position::new(tile.x as f32 + far, current.y),
    }
}
