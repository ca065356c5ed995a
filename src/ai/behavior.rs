//! # Chase Behavior
//!
//! The default bot. On every tick where it stands on a tile center it re-reads
//! the danger map and takes the first applicable tier:
//!
//! 1. escape if standing in danger (or bomb back as a last resort)
//! 2. bomb if that traps an opponent while leaving itself a way out
//! 3. bomb if next to a breakable wall and the bomb is survivable
//! 4. walk toward a power-up, then a breakable wall, then an opponent
//! 5. stand still

use crate::ai::danger::{self, classify, classify_with_bombs, DangerMap};
use crate::{
    can_escape, is_tile_centered, route, Behavior, Bomb, BombId, CostTable, GameState, Move,
    Player,
};

/// Symbols a bot must not stand on.
const DANGER_SYMBOLS: [char; 3] = [danger::PREDICTED_BLAST, danger::EXPLOSION, danger::BOMB];

/// Survive first, then hunt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChaseBehavior;

impl Behavior for ChaseBehavior {
    fn decide_move(&self, player: &Player, state: &GameState) -> Move {
        // Wait until aligned with a tile so moves do not thrash mid-tile.
        if !is_tile_centered(player.position) {
            return Move::NoChange;
        }

        let map = classify(player, state);

        if map.is_any(player.tile(), &DANGER_SYMBOLS) {
            if let Some(escape) = self.escape(player, &map) {
                return escape;
            }
        }

        if self.should_trap_opponent(player, state, &map) {
            log::trace!("{} sets a trap", player.name);
            return Move::PlaceBomb;
        }

        if self.should_clear_wall(player, state, &map) {
            log::trace!("{} bombs a breakable wall", player.name);
            return Move::PlaceBomb;
        }

        let goals = [
            (danger::POWER_UP, CostTable::POWER_UP),
            (danger::BREAKABLE, CostTable::BREAKABLE_WALL),
            (danger::ENEMY, CostTable::ENEMY),
        ];
        for (symbol, costs) in goals {
            if let Some(next) = first_move(&map, player, symbol, &costs) {
                log::trace!("{} heads for '{}' via {:?}", player.name, symbol, next);
                return next;
            }
        }

        Move::DoNothing
    }
}

impl ChaseBehavior {
    /// Route to the nearest safe tile, or counter-bomb when cornered.
    fn escape(&self, player: &Player, map: &DangerMap) -> Option<Move> {
        if let Some(next) = first_move(map, player, danger::EMPTY, &CostTable::AVOID_DANGER) {
            log::trace!("{} escapes {:?}", player.name, next);
            return Some(next);
        }

        if player.bomb_count > 0 && map.get(player.tile()) != Some(danger::BOMB) {
            log::trace!("{} is trapped and bombs back", player.name);
            return Some(Move::PlaceBomb);
        }

        None
    }

    fn should_trap_opponent(&self, player: &Player, state: &GameState, map: &DangerMap) -> bool {
        if player.bomb_count == 0 || !can_escape(map, player.position) {
            return false;
        }

        let bombs = with_hypothetical_bomb(player, state);
        state.opponents_of(player.id).any(|opponent| {
            !can_escape_with(opponent, state, &bombs) && can_escape_with(player, state, &bombs)
        })
    }

    fn should_clear_wall(&self, player: &Player, state: &GameState, map: &DangerMap) -> bool {
        if player.bomb_count == 0 {
            return false;
        }

        let next_to_wall = player
            .tile()
            .neighbors()
            .into_iter()
            .any(|tile| map.get(tile) == Some(danger::BREAKABLE));

        next_to_wall && can_escape_with(player, state, &with_hypothetical_bomb(player, state))
    }
}

/// First step of the cheapest route, if there is one to take.
fn first_move(map: &DangerMap, player: &Player, symbol: char, costs: &CostTable) -> Option<Move> {
    route(map, player.position, symbol, costs).and_then(|moves| moves.first().copied())
}

/// The snapshot's bombs plus one the player could drop right now.
fn with_hypothetical_bomb(player: &Player, state: &GameState) -> Vec<Bomb> {
    let mut bombs = state.bombs.clone();
    bombs.push(Bomb::new(BombId(u64::MAX), player.tile(), player.fire_range));
    bombs
}

/// Whether `player` could reach safety if `bombs` were the live bombs.
fn can_escape_with(player: &Player, state: &GameState, bombs: &[Bomb]) -> bool {
    can_escape(&classify_with_bombs(player, state, bombs), player.position)
}
