//! Domain Entities
//!
//! Players, games and attempts. IDs are assigned by the store, so each
//! entity has a `New*` counterpart describing a record not yet persisted.

use chrono::{DateTime, SubsecRound, Utc};

use crate::domain::value_objects::{
    Age, AttemptId, GameId, GameStatus, Guess, PlayerId, PlayerName, SecretNumber,
};

/// Current time at the store's precision
///
/// `TIMESTAMPTZ` keeps microseconds, so values handed back to callers match
/// what is persisted.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Registered player
#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub first_name: PlayerName,
    pub last_name: PlayerName,
    pub age: Age,
    pub registered_at: DateTime<Utc>,
}

/// Player about to be registered
#[derive(Debug, Clone)]
pub struct NewPlayer {
    pub first_name: PlayerName,
    pub last_name: PlayerName,
    pub age: Age,
    pub registered_at: DateTime<Utc>,
}

impl NewPlayer {
    pub fn new(first_name: PlayerName, last_name: PlayerName, age: Age) -> Self {
        Self {
            first_name,
            last_name,
            age,
            registered_at: now(),
        }
    }

    pub fn into_player(self, id: PlayerId) -> Player {
        Player {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            age: self.age,
            registered_at: self.registered_at,
        }
    }
}

/// A game owned by one player
///
/// `attempts` is only populated when the store was asked to include them,
/// and is in insertion (chronological) order.
#[derive(Debug, Clone)]
pub struct Game {
    pub id: GameId,
    pub player_id: PlayerId,
    pub secret: SecretNumber,
    pub created_at: DateTime<Utc>,
    pub status: GameStatus,
    pub attempts: Vec<Attempt>,
}

impl Game {
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }
}

/// Game about to be started
#[derive(Debug, Clone)]
pub struct NewGame {
    pub player_id: PlayerId,
    pub secret: SecretNumber,
    pub created_at: DateTime<Utc>,
}

impl NewGame {
    /// New games always start `Active`
    pub fn new(player_id: PlayerId, secret: SecretNumber) -> Self {
        Self {
            player_id,
            secret,
            created_at: now(),
        }
    }

    pub fn into_game(self, id: GameId) -> Game {
        Game {
            id,
            player_id: self.player_id,
            secret: self.secret,
            created_at: self.created_at,
            status: GameStatus::Active,
            attempts: Vec::new(),
        }
    }
}

/// One recorded guess and its feedback
#[derive(Debug, Clone)]
pub struct Attempt {
    pub id: AttemptId,
    pub game_id: GameId,
    pub attempted_number: Guess,
    pub result_message: String,
    pub attempted_at: DateTime<Utc>,
}

/// Attempt about to be recorded
#[derive(Debug, Clone)]
pub struct NewAttempt {
    pub game_id: GameId,
    pub attempted_number: Guess,
    pub result_message: String,
    pub attempted_at: DateTime<Utc>,
}

impl NewAttempt {
    pub fn new(game_id: GameId, attempted_number: Guess, result_message: String) -> Self {
        Self {
            game_id,
            attempted_number,
            result_message,
            attempted_at: now(),
        }
    }

    pub fn into_attempt(self, id: AttemptId) -> Attempt {
        Attempt {
            id,
            game_id: self.game_id,
            attempted_number: self.attempted_number,
            result_message: self.result_message,
            attempted_at: self.attempted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_starts_active() {
        let secret = SecretNumber::new("1234").unwrap();
        let game = NewGame::new(PlayerId::new(1), secret).into_game(GameId::new(10));

        assert_eq!(game.id, GameId::new(10));
        assert_eq!(game.player_id, PlayerId::new(1));
        assert!(game.is_active());
        assert!(game.attempts.is_empty());
    }

    #[test]
    fn test_timestamps_have_microsecond_precision() {
        let game = NewGame::new(PlayerId::new(1), SecretNumber::new("1234").unwrap());
        assert_eq!(game.created_at.timestamp_subsec_nanos() % 1_000, 0);
        assert_eq!(game.created_at, game.created_at.trunc_subsecs(6));

        let guess = Guess::parse("5678").unwrap();
        let attempt = NewAttempt::new(GameId::new(1), guess, "miss".into());
        assert_eq!(attempt.attempted_at.timestamp_subsec_nanos() % 1_000, 0);

        let player = NewPlayer::new(
            PlayerName::new("Ana", "firstName").unwrap(),
            PlayerName::new("Lopez", "lastName").unwrap(),
            Age::new(30).unwrap(),
        );
        assert_eq!(player.registered_at.timestamp_subsec_nanos() % 1_000, 0);
    }

    #[test]
    fn test_finished_game_is_not_active() {
        let secret = SecretNumber::new("1234").unwrap();
        let mut game = NewGame::new(PlayerId::new(1), secret).into_game(GameId::new(1));
        game.status = GameStatus::Finished;
        assert!(!game.is_active());
    }

    #[test]
    fn test_new_player_keeps_registration_time() {
        let new_player = NewPlayer::new(
            PlayerName::new("Ana", "firstName").unwrap(),
            PlayerName::new("Lopez", "lastName").unwrap(),
            Age::new(30).unwrap(),
        );
        let registered_at = new_player.registered_at;
        let player = new_player.into_player(PlayerId::new(5));

        assert_eq!(player.id, PlayerId::new(5));
        assert_eq!(player.registered_at, registered_at);
        assert_eq!(player.age.years(), 30);
    }
}
