// Infrastructure layer - SQLite persistence, logging, event bus, messaging

pub mod events;
pub mod logging;
pub mod messaging;
pub mod persistence;
