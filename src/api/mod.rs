//! API endpoint handlers module

pub mod generate;
pub mod health;
