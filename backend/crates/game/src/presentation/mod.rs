//! Presentation Layer
//!
//! HTTP handlers, DTOs and the router for the game API.

pub mod dto;
pub mod handlers;
pub mod router;
