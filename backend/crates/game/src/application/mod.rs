//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! Together the use cases form the game engine: registration, game start
//! and guess submission.

pub mod config;
pub mod guess_number;
pub mod register_player;
pub mod start_game;

// Re-exports
pub use config::GameConfig;
pub use guess_number::{GuessNumberInput, GuessNumberOutput, GuessNumberUseCase};
pub use register_player::{RegisterPlayerInput, RegisterPlayerOutput, RegisterPlayerUseCase};
pub use start_game::{StartGameOutput, StartGameUseCase};
