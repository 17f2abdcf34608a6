//! Start Game Use Case

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::entities::NewGame;
use crate::domain::repository::{GameRepository, PlayerRepository};
use crate::domain::services::SecretGenerator;
use crate::domain::value_objects::{GameId, PlayerId};
use crate::error::{GameError, GameResult};

/// Output DTO for start game
///
/// Deliberately has no secret field.
#[derive(Debug, Clone)]
pub struct StartGameOutput {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub created_at: DateTime<Utc>,
}

/// Start Game Use Case
pub struct StartGameUseCase<P, G>
where
    P: PlayerRepository,
    G: GameRepository,
{
    player_repo: Arc<P>,
    game_repo: Arc<G>,
    secrets: Arc<dyn SecretGenerator>,
}

impl<P, G> StartGameUseCase<P, G>
where
    P: PlayerRepository,
    G: GameRepository,
{
    pub fn new(player_repo: Arc<P>, game_repo: Arc<G>, secrets: Arc<dyn SecretGenerator>) -> Self {
        Self {
            player_repo,
            game_repo,
            secrets,
        }
    }

    pub async fn execute(&self, player_id: PlayerId) -> GameResult<StartGameOutput> {
        tracing::info!(player_id = %player_id, "Starting game");

        if self
            .player_repo
            .find_player_by_id(player_id)
            .await?
            .is_none()
        {
            tracing::warn!(player_id = %player_id, "Player not found");
            return Err(GameError::PlayerNotFound(player_id));
        }

        if let Some(active) = self.game_repo.find_active_game_by_player(player_id).await? {
            tracing::warn!(
                player_id = %player_id,
                game_id = %active.id,
                "Player already has an active game"
            );
            return Err(GameError::ActiveGameExists { game_id: active.id });
        }

        let game = NewGame::new(player_id, self.secrets.generate());
        // Store enforces one active game per player against concurrent starts
        let game_id = self.game_repo.save_game(&game).await?;

        tracing::info!(player_id = %player_id, game_id = %game_id, "Game started");

        Ok(StartGameOutput {
            game_id,
            player_id,
            created_at: game.created_at,
        })
    }
}
