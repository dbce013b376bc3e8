pub mod app;
pub mod config;
pub mod cpu;
pub mod display;
pub mod error;
pub mod instruction;
pub mod keypad;
pub mod quirks;
pub mod state;
