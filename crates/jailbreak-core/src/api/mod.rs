pub mod config;
pub mod simulation;
pub mod snapshot;
pub mod state;
pub mod types;
pub mod world;
