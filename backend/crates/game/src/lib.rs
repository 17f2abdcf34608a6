//! Number Guessing Game Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, secret generation, scoring, repository traits
//! - `application/` - Use cases (register, start, guess)
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Rules
//! - A player is identified by the exact (first name, last name) pair
//! - A player has at most one active game, enforced by the store
//! - A guess matching the secret finishes the game; later guesses are rejected
//! - The secret never leaves the engine/store boundary

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::GameConfig;
pub use error::{GameError, GameResult};
pub use infra::{InMemoryGameRepository, PgGameRepository};
pub use presentation::handlers::GameAppState;
pub use presentation::router::{game_router, game_router_generic, game_router_with_state};

// Re-export kernel error types for unified error handling
pub use kernel::error::{app_error::AppError, kind::ErrorKind};
