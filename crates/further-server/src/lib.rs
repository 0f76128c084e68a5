//! HTTP server and process bootstrap: application context, routes, rate
//! limiting and the serving loop.

pub mod bootstrap;
pub mod dto;
pub mod error;
pub mod limiter;
pub mod routes;
pub mod server;
pub mod state;
