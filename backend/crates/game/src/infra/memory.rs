//! In-Memory Repository
//!
//! Used when no database is configured and by the test suite. Every check
//! and insert for one operation happens under a single write lock, so the
//! uniqueness rules hold under concurrent requests just as in Postgres.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entities::{Game, NewAttempt, NewGame, NewPlayer, Player};
use crate::domain::repository::{AttemptRepository, GameRepository, PlayerRepository};
use crate::domain::value_objects::{AttemptId, GameId, GameStatus, PlayerId, PlayerName};
use crate::error::{GameError, GameResult};

#[derive(Default)]
struct Tables {
    players: HashMap<PlayerId, Player>,
    games: HashMap<GameId, Game>,
    next_player_id: i64,
    next_game_id: i64,
    next_attempt_id: i64,
}

impl Tables {
    fn next_id(counter: &mut i64) -> i64 {
        *counter += 1;
        *counter
    }
}

/// Process-local repository backed by hash maps
#[derive(Clone, Default)]
pub struct InMemoryGameRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlayerRepository for InMemoryGameRepository {
    async fn find_player_by_name(
        &self,
        first_name: &PlayerName,
        last_name: &PlayerName,
    ) -> GameResult<Option<Player>> {
        let tables = self.tables.read().await;
        Ok(tables
            .players
            .values()
            .find(|p| p.first_name == *first_name && p.last_name == *last_name)
            .cloned())
    }

    async fn find_player_by_id(&self, player_id: PlayerId) -> GameResult<Option<Player>> {
        let tables = self.tables.read().await;
        Ok(tables.players.get(&player_id).cloned())
    }

    async fn save_player(&self, player: &NewPlayer) -> GameResult<PlayerId> {
        let mut tables = self.tables.write().await;

        if let Some(existing) = tables
            .players
            .values()
            .find(|p| p.first_name == player.first_name && p.last_name == player.last_name)
        {
            return Err(GameError::PlayerAlreadyExists {
                player_id: existing.id,
            });
        }

        let id = PlayerId::new(Tables::next_id(&mut tables.next_player_id));
        tables.players.insert(id, player.clone().into_player(id));
        Ok(id)
    }
}

impl GameRepository for InMemoryGameRepository {
    async fn find_active_game_by_player(&self, player_id: PlayerId) -> GameResult<Option<Game>> {
        let tables = self.tables.read().await;
        Ok(tables
            .games
            .values()
            .find(|g| g.player_id == player_id && g.is_active())
            .map(|g| Game {
                attempts: Vec::new(),
                ..g.clone()
            }))
    }

    async fn find_game_by_id(
        &self,
        game_id: GameId,
        include_attempts: bool,
    ) -> GameResult<Option<Game>> {
        let tables = self.tables.read().await;
        Ok(tables.games.get(&game_id).map(|g| {
            let mut game = g.clone();
            if !include_attempts {
                game.attempts.clear();
            }
            game
        }))
    }

    async fn save_game(&self, game: &NewGame) -> GameResult<GameId> {
        let mut tables = self.tables.write().await;

        if let Some(active) = tables
            .games
            .values()
            .find(|g| g.player_id == game.player_id && g.is_active())
        {
            return Err(GameError::ActiveGameExists { game_id: active.id });
        }

        let id = GameId::new(Tables::next_id(&mut tables.next_game_id));
        tables.games.insert(id, game.clone().into_game(id));
        Ok(id)
    }
}

impl AttemptRepository for InMemoryGameRepository {
    async fn save_attempt(
        &self,
        attempt: &NewAttempt,
        finish_game: bool,
    ) -> GameResult<AttemptId> {
        let mut guard = self.tables.write().await;
        let Tables {
            games,
            next_attempt_id,
            ..
        } = &mut *guard;

        let game = games
            .get_mut(&attempt.game_id)
            .ok_or(GameError::GameNotFound(attempt.game_id))?;

        if !game.is_active() {
            return Err(GameError::GameNotActive(attempt.game_id));
        }

        let id = AttemptId::new(Tables::next_id(next_attempt_id));
        game.attempts.push(attempt.clone().into_attempt(id));
        if finish_game {
            game.status = GameStatus::Finished;
        }

        Ok(id)
    }
}

/// Attempts recorded for a game, in insertion order
#[cfg(test)]
impl InMemoryGameRepository {
    pub(crate) async fn attempts_of(
        &self,
        game_id: GameId,
    ) -> Vec<crate::domain::entities::Attempt> {
        let tables = self.tables.read().await;
        tables
            .games
            .get(&game_id)
            .map(|g| g.attempts.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Age, Guess, SecretNumber};

    fn new_player(first: &str, last: &str) -> NewPlayer {
        NewPlayer::new(
            PlayerName::new(first, "firstName").unwrap(),
            PlayerName::new(last, "lastName").unwrap(),
            Age::new(30).unwrap(),
        )
    }

    fn new_game(player_id: PlayerId) -> NewGame {
        NewGame::new(player_id, SecretNumber::new("1234").unwrap())
    }

    #[tokio::test]
    async fn test_player_ids_are_distinct() {
        let repo = InMemoryGameRepository::new();
        let a = repo.save_player(&new_player("Ana", "Lopez")).await.unwrap();
        let b = repo.save_player(&new_player("Ana", "Perez")).await.unwrap();

        assert_ne!(a, b);
        assert!(a.value() > 0 && b.value() > 0);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let repo = InMemoryGameRepository::new();
        let first = repo.save_player(&new_player("Ana", "Lopez")).await.unwrap();

        let err = repo
            .save_player(&new_player("Ana", "Lopez"))
            .await
            .unwrap_err();
        assert!(matches!(err, GameError::PlayerAlreadyExists { player_id } if player_id == first));
    }

    #[tokio::test]
    async fn test_second_active_game_rejected() {
        let repo = InMemoryGameRepository::new();
        let player = repo.save_player(&new_player("Ana", "Lopez")).await.unwrap();
        let game = repo.save_game(&new_game(player)).await.unwrap();

        let err = repo.save_game(&new_game(player)).await.unwrap_err();
        assert!(matches!(err, GameError::ActiveGameExists { game_id } if game_id == game));
    }

    #[tokio::test]
    async fn test_finished_game_allows_new_one() {
        let repo = InMemoryGameRepository::new();
        let player = repo.save_player(&new_player("Ana", "Lopez")).await.unwrap();
        let game = repo.save_game(&new_game(player)).await.unwrap();

        let win = NewAttempt::new(game, Guess::parse("1234").unwrap(), "won".into());
        repo.save_attempt(&win, true).await.unwrap();

        let next = repo.save_game(&new_game(player)).await.unwrap();
        assert_ne!(next, game);
        let active = repo.find_active_game_by_player(player).await.unwrap().unwrap();
        assert_eq!(active.id, next);
    }

    #[tokio::test]
    async fn test_attempt_on_finished_game_rejected() {
        let repo = InMemoryGameRepository::new();
        let player = repo.save_player(&new_player("Ana", "Lopez")).await.unwrap();
        let game = repo.save_game(&new_game(player)).await.unwrap();

        let win = NewAttempt::new(game, Guess::parse("1234").unwrap(), "won".into());
        repo.save_attempt(&win, true).await.unwrap();

        let late = NewAttempt::new(game, Guess::parse("5678").unwrap(), "late".into());
        let err = repo.save_attempt(&late, false).await.unwrap_err();
        assert!(matches!(err, GameError::GameNotActive(id) if id == game));
        assert_eq!(repo.attempts_of(game).await.len(), 1);
    }

    #[tokio::test]
    async fn test_attempts_loaded_on_request() {
        let repo = InMemoryGameRepository::new();
        let player = repo.save_player(&new_player("Ana", "Lopez")).await.unwrap();
        let game = repo.save_game(&new_game(player)).await.unwrap();

        for guess in ["5678", "1243"] {
            let attempt = NewAttempt::new(game, Guess::parse(guess).unwrap(), "miss".into());
            repo.save_attempt(&attempt, false).await.unwrap();
        }

        let bare = repo.find_game_by_id(game, false).await.unwrap().unwrap();
        assert!(bare.attempts.is_empty());

        let full = repo.find_game_by_id(game, true).await.unwrap().unwrap();
        let guesses: Vec<_> = full
            .attempts
            .iter()
            .map(|a| a.attempted_number.as_str().to_string())
            .collect();
        assert_eq!(guesses, vec!["5678", "1243"]);
    }

    #[tokio::test]
    async fn test_unknown_game() {
        let repo = InMemoryGameRepository::new();
        assert!(repo.find_game_by_id(GameId::new(42), true).await.unwrap().is_none());

        let attempt = NewAttempt::new(GameId::new(42), Guess::parse("1234").unwrap(), "x".into());
        let err = repo.save_attempt(&attempt, false).await.unwrap_err();
        assert!(matches!(err, GameError::GameNotFound(_)));
    }
}
