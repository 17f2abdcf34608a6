//! Guess Number Use Case
//!
//! Validates a guess against the game's rules, scores it, and records the
//! attempt. A guess equal to the secret finishes the game.

use std::sync::Arc;

use crate::application::config::GameConfig;
use crate::domain::entities::NewAttempt;
use crate::domain::repository::{AttemptRepository, GameRepository};
use crate::domain::services::GuessEvaluator;
use crate::domain::value_objects::{GameId, Guess};
use crate::error::{GameError, GameResult};

/// Input DTO for guess number
#[derive(Debug, Clone)]
pub struct GuessNumberInput {
    pub game_id: GameId,
    /// Shape-validated; digit uniqueness is checked here
    pub attempted_number: Guess,
}

/// Output DTO for guess number
#[derive(Debug, Clone)]
pub struct GuessNumberOutput {
    pub game_id: GameId,
    pub attempted_number: Guess,
    pub message: String,
    /// True if this guess finished the game
    pub finished: bool,
}

/// Guess Number Use Case
pub struct GuessNumberUseCase<G, A>
where
    G: GameRepository,
    A: AttemptRepository,
{
    game_repo: Arc<G>,
    attempt_repo: Arc<A>,
    evaluator: Arc<dyn GuessEvaluator>,
    config: Arc<GameConfig>,
}

impl<G, A> GuessNumberUseCase<G, A>
where
    G: GameRepository,
    A: AttemptRepository,
{
    pub fn new(
        game_repo: Arc<G>,
        attempt_repo: Arc<A>,
        evaluator: Arc<dyn GuessEvaluator>,
        config: Arc<GameConfig>,
    ) -> Self {
        Self {
            game_repo,
            attempt_repo,
            evaluator,
            config,
        }
    }

    pub async fn execute(&self, input: GuessNumberInput) -> GameResult<GuessNumberOutput> {
        let game_id = input.game_id;

        tracing::info!(game_id = %game_id, "Processing guess");

        let game = self
            .game_repo
            .find_game_by_id(game_id, true)
            .await?
            .ok_or(GameError::GameNotFound(game_id))?;

        if !game.is_active() {
            tracing::warn!(game_id = %game_id, status = %game.status, "Guess on inactive game");
            return Err(GameError::GameNotActive(game_id));
        }

        if !input.attempted_number.has_unique_digits() {
            tracing::warn!(
                game_id = %game_id,
                attempted_number = %input.attempted_number,
                "Guess repeats a digit"
            );
            return Err(GameError::InvalidAttempt);
        }

        let finished = game.secret.is_matched_by(&input.attempted_number);
        let message = if finished {
            self.config.win_message.clone()
        } else {
            self.evaluator
                .evaluate(&game.secret, &input.attempted_number)
        };

        let attempt = NewAttempt::new(game_id, input.attempted_number, message);
        // Fails with GameNotActive if a concurrent guess finished the game first
        let attempt_id = self.attempt_repo.save_attempt(&attempt, finished).await?;

        if finished {
            tracing::info!(
                game_id = %game_id,
                attempts = game.attempts.len() + 1,
                "Game finished, number guessed"
            );
        } else {
            tracing::debug!(game_id = %game_id, attempt_id = %attempt_id, "Attempt recorded");
        }

        Ok(GuessNumberOutput {
            game_id,
            attempted_number: attempt.attempted_number,
            message: attempt.result_message,
            finished,
        })
    }
}
