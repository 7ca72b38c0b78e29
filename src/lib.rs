//! A small blog service with a sentiment-analysis endpoint.
//!
//! - Registration, login and cookie sessions
//! - Post authoring with author-only edit/delete
//! - Paginated feeds (global and per user)
//! - Avatar uploads
//! - VADER polarity scoring of free text

pub mod auth;
pub mod config;
pub mod dto;
pub mod errors;
pub mod forms;
pub mod models;
pub mod router;
pub mod routes;
pub mod sentiment;
pub mod states;
pub mod store;
pub mod uploads;

pub use models::{Post, User};
pub use states::AppState;
