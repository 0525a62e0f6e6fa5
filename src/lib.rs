pub mod common;
pub mod config;
pub mod error;
pub mod problem;
pub mod puzzle;
pub mod search;
pub mod stat;
pub mod strategy;
