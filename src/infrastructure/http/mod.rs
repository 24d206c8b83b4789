//! HTTP Layer - RESTful API
//!
//! 统一响应 `{code, message, data?}`，身份由中间件从 Authorization 解析

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

#[cfg(test)]
mod tests;

pub use error::ApiError;
pub use routes::create_routes;
pub use server::{build_router, HttpServer, ServerConfig};
pub use state::{AppState, Repositories};
