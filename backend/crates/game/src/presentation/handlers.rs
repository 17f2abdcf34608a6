//! HTTP Handlers

use crate::application::config::GameConfig;
use crate::application::{GuessNumberUseCase, RegisterPlayerUseCase, StartGameUseCase};
use crate::domain::repository::{AttemptRepository, GameRepository, PlayerRepository};
use crate::domain::services::{
    BullsAndCowsEvaluator, GuessEvaluator, RandomSecretGenerator, SecretGenerator,
};
use crate::error::GameResult;
use crate::presentation::dto::{
    GuessNumberRequest, GuessNumberResponse, RegisterPlayerRequest, RegisterPlayerResponse,
    StartGameRequest, StartGameResponse,
};
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use std::sync::Arc;

/// Shared state for game handlers
#[derive(Clone)]
pub struct GameAppState<R>
where
    R: PlayerRepository + GameRepository + AttemptRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<GameConfig>,
    pub secrets: Arc<dyn SecretGenerator>,
    pub evaluator: Arc<dyn GuessEvaluator>,
}

impl<R> GameAppState<R>
where
    R: PlayerRepository + GameRepository + AttemptRepository + Clone + Send + Sync + 'static,
{
    /// State with the random generator and bulls-and-cows scoring
    pub fn new(repo: R, config: GameConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            secrets: Arc::new(RandomSecretGenerator),
            evaluator: Arc::new(BullsAndCowsEvaluator),
        }
    }

    pub fn with_secret_generator(mut self, secrets: Arc<dyn SecretGenerator>) -> Self {
        self.secrets = secrets;
        self
    }

    pub fn with_evaluator(mut self, evaluator: Arc<dyn GuessEvaluator>) -> Self {
        self.evaluator = evaluator;
        self
    }
}

/// POST /register
pub async fn register_player<R>(
    State(state): State<GameAppState<R>>,
    payload: Result<Json<RegisterPlayerRequest>, JsonRejection>,
) -> GameResult<Json<RegisterPlayerResponse>>
where
    R: PlayerRepository + GameRepository + AttemptRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let input = req.into_input()?;

    let use_case = RegisterPlayerUseCase::new(state.repo.clone());
    let output = use_case.execute(input).await?;

    Ok(Json(RegisterPlayerResponse {
        player_id: output.player_id.value(),
    }))
}

/// POST /start
pub async fn start_game<R>(
    State(state): State<GameAppState<R>>,
    payload: Result<Json<StartGameRequest>, JsonRejection>,
) -> GameResult<Json<StartGameResponse>>
where
    R: PlayerRepository + GameRepository + AttemptRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let player_id = req.into_player_id()?;

    let use_case =
        StartGameUseCase::new(state.repo.clone(), state.repo.clone(), state.secrets.clone());
    let output = use_case.execute(player_id).await?;

    Ok(Json(StartGameResponse {
        game_id: output.game_id.value(),
        player_id: output.player_id.value(),
        created_at: output.created_at,
    }))
}

/// POST /guess
pub async fn guess_number<R>(
    State(state): State<GameAppState<R>>,
    payload: Result<Json<GuessNumberRequest>, JsonRejection>,
) -> GameResult<Json<GuessNumberResponse>>
where
    R: PlayerRepository + GameRepository + AttemptRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let input = req.into_input()?;

    let use_case = GuessNumberUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.evaluator.clone(),
        state.config.clone(),
    );
    let output = use_case.execute(input).await?;

    Ok(Json(GuessNumberResponse {
        game_id: output.game_id.value(),
        attempted_number: output.attempted_number.as_str().to_string(),
        message: output.message,
    }))
}
