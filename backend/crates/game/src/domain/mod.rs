//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Player, Game, Attempt)
//! - Domain value objects (PlayerName, Age, Guess, SecretNumber, GameStatus)
//! - Domain services (secret generation, guess scoring)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
