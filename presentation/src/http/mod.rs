//! HTTP surface: chat endpoints and health check

pub mod dto;
pub mod routes;
pub mod server;

pub use dto::{ChatRequest, ChatResponse, HealthResponse};
pub use server::{AppState, router, run};
