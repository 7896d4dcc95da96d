//! different utility modules used throughout the project
/// tiny module to save solution into file
pub mod logger;
/// TOML task file for the command line calculator
pub mod task_config;
