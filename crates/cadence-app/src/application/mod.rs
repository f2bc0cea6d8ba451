pub mod commands;
pub mod config;
pub mod dtos;
pub mod queries;
pub mod services;
