pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod resolver;
pub mod scanner;
pub mod server;
