//! Game Router

use crate::application::config::GameConfig;
use crate::domain::repository::{AttemptRepository, GameRepository, PlayerRepository};
use crate::infra::postgres::PgGameRepository;
use crate::presentation::handlers::{self, GameAppState};
use axum::{Router, routing::post};

/// Create the game router with PostgreSQL repository
pub fn game_router(repo: PgGameRepository, config: GameConfig) -> Router {
    game_router_with_state(GameAppState::new(repo, config))
}

/// Create a generic game router for any repository implementation
pub fn game_router_generic<R>(repo: R, config: GameConfig) -> Router
where
    R: PlayerRepository + GameRepository + AttemptRepository + Clone + Send + Sync + 'static,
{
    game_router_with_state(GameAppState::new(repo, config))
}

/// Create the game router from prepared state (custom generator or evaluator)
pub fn game_router_with_state<R>(state: GameAppState<R>) -> Router
where
    R: PlayerRepository + GameRepository + AttemptRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/register", post(handlers::register_player::<R>))
        .route("/start", post(handlers::start_game::<R>))
        .route("/guess", post(handlers::guess_number::<R>))
        .with_state(state)
}
