//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.
//!
//! Uniqueness rules ("one player per name pair", "one active game per
//! player") are enforced by the store itself at insert time, so two
//! concurrent requests can never both pass a check-then-insert.

use crate::domain::entities::{Game, NewAttempt, NewGame, NewPlayer, Player};
use crate::domain::value_objects::{AttemptId, GameId, PlayerId, PlayerName};
use crate::error::GameResult;

/// Player repository trait
#[trait_variant::make(PlayerRepository: Send)]
pub trait LocalPlayerRepository {
    /// Find a player by exact (first name, last name)
    async fn find_player_by_name(
        &self,
        first_name: &PlayerName,
        last_name: &PlayerName,
    ) -> GameResult<Option<Player>>;

    async fn find_player_by_id(&self, player_id: PlayerId) -> GameResult<Option<Player>>;

    /// Insert a player and return the assigned ID
    ///
    /// Fails with `PlayerAlreadyExists` if the name pair is taken.
    async fn save_player(&self, player: &NewPlayer) -> GameResult<PlayerId>;
}

/// Game repository trait
#[trait_variant::make(GameRepository: Send)]
pub trait LocalGameRepository {
    async fn find_active_game_by_player(&self, player_id: PlayerId) -> GameResult<Option<Game>>;

    /// Find a game, optionally loading its attempts in chronological order
    async fn find_game_by_id(
        &self,
        game_id: GameId,
        include_attempts: bool,
    ) -> GameResult<Option<Game>>;

    /// Insert an active game and return the assigned ID
    ///
    /// Fails with `ActiveGameExists` if the player already has one.
    async fn save_game(&self, game: &NewGame) -> GameResult<GameId>;
}

/// Attempt repository trait
#[trait_variant::make(AttemptRepository: Send)]
pub trait LocalAttemptRepository {
    /// Record an attempt, finishing the game in the same atomic step if
    /// `finish_game` is set
    ///
    /// The game must still be active at commit time; otherwise nothing is
    /// written and `GameNotActive` is returned.
    async fn save_attempt(&self, attempt: &NewAttempt, finish_game: bool)
    -> GameResult<AttemptId>;
}
