pub mod config;
pub mod engine;
pub mod ludo;
pub mod misc;
pub mod simulation;
