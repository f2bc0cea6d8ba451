// Application layer - command handlers, queries, configuration

pub mod application;
pub mod bootstrap;
