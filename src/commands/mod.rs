pub mod agenda;
pub mod config;
