//! PostgreSQL Repository Implementations
//!
//! Schema lives in `database/migrations`. The unique constraint on player
//! names and the partial unique index on active games make the store the
//! authority for both uniqueness rules.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entities::{Attempt, Game, NewAttempt, NewGame, NewPlayer, Player};
use crate::domain::repository::{AttemptRepository, GameRepository, PlayerRepository};
use crate::domain::value_objects::{
    Age, AttemptId, GameId, GameStatus, Guess, PlayerId, PlayerName, SecretNumber,
};
use crate::error::{GameError, GameResult};

/// Inserts `save_game` tries before reporting a conflict that keeps moving
const SAVE_GAME_ATTEMPTS: usize = 3;

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgGameRepository {
    pool: PgPool,
}

impl PgGameRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert unless the player already has an active game
    async fn insert_active_game(&self, game: &NewGame) -> GameResult<Option<i64>> {
        let inserted = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO games (player_id, secret_number, created_at, game_status)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (player_id) WHERE game_status = 0 DO NOTHING
            RETURNING game_id
            "#,
        )
        .bind(game.player_id.value())
        .bind(game.secret.expose())
        .bind(game.created_at)
        .bind(GameStatus::Active.id())
        .fetch_optional(&self.pool)
        .await?;

        Ok(inserted)
    }

    async fn attempts_for(&self, game_id: GameId) -> GameResult<Vec<Attempt>> {
        let rows = sqlx::query_as::<_, AttemptRow>(
            r#"
            SELECT
                attempt_id,
                game_id,
                attempted_number,
                result_message,
                attempted_at
            FROM attempts
            WHERE game_id = $1
            ORDER BY attempt_id
            "#,
        )
        .bind(game_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AttemptRow::into_attempt).collect()
    }
}

// ============================================================================
// Player Repository Implementation
// ============================================================================

impl PlayerRepository for PgGameRepository {
    async fn find_player_by_name(
        &self,
        first_name: &PlayerName,
        last_name: &PlayerName,
    ) -> GameResult<Option<Player>> {
        let row = sqlx::query_as::<_, PlayerRow>(
            r#"
            SELECT player_id, first_name, last_name, age, registered_at
            FROM players
            WHERE first_name = $1 AND last_name = $2
            "#,
        )
        .bind(first_name.as_str())
        .bind(last_name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(PlayerRow::into_player).transpose()
    }

    async fn find_player_by_id(&self, player_id: PlayerId) -> GameResult<Option<Player>> {
        let row = sqlx::query_as::<_, PlayerRow>(
            r#"
            SELECT player_id, first_name, last_name, age, registered_at
            FROM players
            WHERE player_id = $1
            "#,
        )
        .bind(player_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(PlayerRow::into_player).transpose()
    }

    async fn save_player(&self, player: &NewPlayer) -> GameResult<PlayerId> {
        let inserted = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO players (first_name, last_name, age, registered_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT ON CONSTRAINT players_name_unique DO NOTHING
            RETURNING player_id
            "#,
        )
        .bind(player.first_name.as_str())
        .bind(player.last_name.as_str())
        .bind(i16::from(player.age.years()))
        .bind(player.registered_at)
        .fetch_optional(&self.pool)
        .await?;

        match inserted {
            Some(id) => Ok(PlayerId::new(id)),
            None => {
                // Lost the race to a concurrent registration
                let existing = self
                    .find_player_by_name(&player.first_name, &player.last_name)
                    .await?
                    .ok_or_else(|| {
                        GameError::Internal("player name conflict without a matching row".into())
                    })?;
                Err(GameError::PlayerAlreadyExists {
                    player_id: existing.id,
                })
            }
        }
    }
}

// ============================================================================
// Game Repository Implementation
// ============================================================================

impl GameRepository for PgGameRepository {
    async fn find_active_game_by_player(&self, player_id: PlayerId) -> GameResult<Option<Game>> {
        let row = sqlx::query_as::<_, GameRow>(
            r#"
            SELECT game_id, player_id, secret_number, created_at, game_status
            FROM games
            WHERE player_id = $1 AND game_status = $2
            "#,
        )
        .bind(player_id.value())
        .bind(GameStatus::Active.id())
        .fetch_optional(&self.pool)
        .await?;

        row.map(GameRow::into_game).transpose()
    }

    async fn find_game_by_id(
        &self,
        game_id: GameId,
        include_attempts: bool,
    ) -> GameResult<Option<Game>> {
        let row = sqlx::query_as::<_, GameRow>(
            r#"
            SELECT game_id, player_id, secret_number, created_at, game_status
            FROM games
            WHERE game_id = $1
            "#,
        )
        .bind(game_id.value())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut game = row.into_game()?;
        if include_attempts {
            game.attempts = self.attempts_for(game_id).await?;
        }
        Ok(Some(game))
    }

    async fn save_game(&self, game: &NewGame) -> GameResult<GameId> {
        for _ in 0..SAVE_GAME_ATTEMPTS {
            if let Some(id) = self.insert_active_game(game).await? {
                return Ok(GameId::new(id));
            }

            // The conflicting game may have finished since the insert
            let active = self.find_active_game_by_player(game.player_id).await?;
            if let Some(err) = active_game_conflict(active.as_ref()) {
                return Err(err);
            }
        }

        Err(GameError::Internal(format!(
            "active game for player {} kept changing during insert",
            game.player_id
        )))
    }
}

// ============================================================================
// Attempt Repository Implementation
// ============================================================================

impl AttemptRepository for PgGameRepository {
    async fn save_attempt(
        &self,
        attempt: &NewAttempt,
        finish_game: bool,
    ) -> GameResult<AttemptId> {
        let mut tx = self.pool.begin().await?;

        // Row lock serializes concurrent guesses on the same game
        let status = sqlx::query_scalar::<_, i16>(
            "SELECT game_status FROM games WHERE game_id = $1 FOR UPDATE",
        )
        .bind(attempt.game_id.value())
        .fetch_optional(&mut *tx)
        .await?;

        match status.map(GameStatus::from_id) {
            None => return Err(GameError::GameNotFound(attempt.game_id)),
            Some(Some(GameStatus::Active)) => {}
            Some(Some(GameStatus::Finished)) => {
                return Err(GameError::GameNotActive(attempt.game_id));
            }
            Some(None) => {
                return Err(GameError::Internal(format!(
                    "unknown game_status for game {}",
                    attempt.game_id
                )));
            }
        }

        let attempt_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO attempts (game_id, attempted_number, result_message, attempted_at)
            VALUES ($1, $2, $3, $4)
            RETURNING attempt_id
            "#,
        )
        .bind(attempt.game_id.value())
        .bind(attempt.attempted_number.as_str())
        .bind(&attempt.result_message)
        .bind(attempt.attempted_at)
        .fetch_one(&mut *tx)
        .await?;

        if finish_game {
            sqlx::query("UPDATE games SET game_status = $2 WHERE game_id = $1")
                .bind(attempt.game_id.value())
                .bind(GameStatus::Finished.id())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(AttemptId::new(attempt_id))
    }
}

// Internal row types for sqlx mapping
#[derive(sqlx::FromRow)]
struct PlayerRow {
    player_id: i64,
    first_name: String,
    last_name: String,
    age: i16,
    registered_at: DateTime<Utc>,
}

impl PlayerRow {
    fn into_player(self) -> GameResult<Player> {
        Ok(Player {
            id: PlayerId::new(self.player_id),
            first_name: PlayerName::new(self.first_name, "first_name").map_err(corrupt_row)?,
            last_name: PlayerName::new(self.last_name, "last_name").map_err(corrupt_row)?,
            age: Age::new(i64::from(self.age)).map_err(corrupt_row)?,
            registered_at: self.registered_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct GameRow {
    game_id: i64,
    player_id: i64,
    secret_number: String,
    created_at: DateTime<Utc>,
    game_status: i16,
}

impl GameRow {
    fn into_game(self) -> GameResult<Game> {
        let status = GameStatus::from_id(self.game_status).ok_or_else(|| {
            GameError::Internal(format!("unknown game_status {}", self.game_status))
        })?;
        Ok(Game {
            id: GameId::new(self.game_id),
            player_id: PlayerId::new(self.player_id),
            secret: SecretNumber::new(&self.secret_number).map_err(corrupt_row)?,
            created_at: self.created_at,
            status,
            attempts: Vec::new(),
        })
    }
}

#[derive(sqlx::FromRow)]
struct AttemptRow {
    attempt_id: i64,
    game_id: i64,
    attempted_number: String,
    result_message: String,
    attempted_at: DateTime<Utc>,
}

impl AttemptRow {
    fn into_attempt(self) -> GameResult<Attempt> {
        Ok(Attempt {
            id: AttemptId::new(self.attempt_id),
            game_id: GameId::new(self.game_id),
            attempted_number: Guess::parse(&self.attempted_number).map_err(corrupt_row)?,
            result_message: self.result_message,
            attempted_at: self.attempted_at,
        })
    }
}

/// Error for a rejected game insert, or `None` if no active game blocks a retry
fn active_game_conflict(active: Option<&Game>) -> Option<GameError> {
    active
        .filter(|game| game.is_active())
        .map(|game| GameError::ActiveGameExists { game_id: game.id })
}

fn corrupt_row(err: crate::domain::value_objects::ValidationError) -> GameError {
    GameError::Internal(format!("stored row failed validation: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(status: GameStatus) -> Game {
        let mut game = NewGame::new(PlayerId::new(1), SecretNumber::new("1234").unwrap())
            .into_game(GameId::new(8));
        game.status = status;
        game
    }

    #[test]
    fn test_conflict_with_active_game() {
        let active = game(GameStatus::Active);
        let err = active_game_conflict(Some(&active)).unwrap();
        assert!(matches!(err, GameError::ActiveGameExists { game_id } if game_id == GameId::new(8)));
    }

    #[test]
    fn test_vanished_conflict_allows_retry() {
        assert!(active_game_conflict(None).is_none());
        assert!(active_game_conflict(Some(&game(GameStatus::Finished))).is_none());
    }

    #[test]
    fn test_row_mapping_rejects_corrupt_secret() {
        let row = GameRow {
            game_id: 1,
            player_id: 1,
            secret_number: "1123".into(),
            created_at: Utc::now(),
            game_status: 0,
        };
        assert!(matches!(row.into_game(), Err(GameError::Internal(_))));
    }

    #[test]
    fn test_row_mapping_rejects_unknown_status() {
        let row = GameRow {
            game_id: 1,
            player_id: 1,
            secret_number: "1234".into(),
            created_at: Utc::now(),
            game_status: 7,
        };
        assert!(matches!(row.into_game(), Err(GameError::Internal(_))));
    }
}
