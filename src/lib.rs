pub mod action_handler;
pub mod app;
pub mod clipboard;
pub mod command;
pub mod command_table;
pub mod config;
pub mod dispatcher;
pub mod input;
pub mod key;
pub mod logging;
pub mod paths;
pub mod state;
pub mod syntax;

mod ui;
