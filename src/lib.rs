// Time-grid calendar engine
// Exports all modules for hosts and tests

pub mod config;
pub mod engine;
pub mod gestures;
pub mod models;
pub mod services;
pub mod utils;
