pub mod command;
pub mod context;
pub mod editor;
pub mod log;
pub mod paths;
pub mod tmux;
