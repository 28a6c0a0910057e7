pub mod commands;
pub mod config;
mod context;
pub mod emitter;
pub mod server;

pub use context::AppContext;
