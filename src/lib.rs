pub mod cli;
pub mod config;
pub mod container;
pub mod crypto;
pub mod entry;
pub mod errors;
pub mod generator;
