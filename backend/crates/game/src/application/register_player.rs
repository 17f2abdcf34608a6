//! Register Player Use Case
//!
//! Creates a new player whose (first name, last name) pair is unused.

use std::sync::Arc;

use crate::domain::entities::NewPlayer;
use crate::domain::repository::PlayerRepository;
use crate::domain::value_objects::{Age, PlayerId, PlayerName};
use crate::error::{GameError, GameResult};

/// Register player input
#[derive(Debug, Clone)]
pub struct RegisterPlayerInput {
    pub first_name: PlayerName,
    pub last_name: PlayerName,
    pub age: Age,
}

/// Register player output
#[derive(Debug, Clone)]
pub struct RegisterPlayerOutput {
    pub player_id: PlayerId,
}

/// Register player use case
pub struct RegisterPlayerUseCase<P>
where
    P: PlayerRepository,
{
    player_repo: Arc<P>,
}

impl<P> RegisterPlayerUseCase<P>
where
    P: PlayerRepository,
{
    pub fn new(player_repo: Arc<P>) -> Self {
        Self { player_repo }
    }

    pub async fn execute(&self, input: RegisterPlayerInput) -> GameResult<RegisterPlayerOutput> {
        tracing::info!(
            first_name = %input.first_name,
            last_name = %input.last_name,
            "Registering player"
        );

        // Fast path; the store re-checks atomically on insert
        if let Some(existing) = self
            .player_repo
            .find_player_by_name(&input.first_name, &input.last_name)
            .await?
        {
            return Err(GameError::PlayerAlreadyExists {
                player_id: existing.id,
            });
        }

        let player = NewPlayer::new(input.first_name, input.last_name, input.age);
        let player_id = self.player_repo.save_player(&player).await?;

        tracing::info!(player_id = %player_id, "Player registered");

        Ok(RegisterPlayerOutput { player_id })
    }
}
