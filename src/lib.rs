pub mod codec;
pub mod commands;
pub mod config;
pub mod daemon;
pub mod error;
pub mod fs;
pub mod gpio;
pub mod models;
pub mod observability;
pub mod periodic;
pub mod sync;
pub mod time;
