//! API request handlers

pub mod generate;
pub mod health;
pub mod monitor;
