pub mod assignment_commands;
pub mod command_handler;
pub mod handlers;
