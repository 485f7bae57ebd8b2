pub mod app_data;
pub mod config;
pub mod error;
pub mod game;
pub mod io;
pub mod layout;
pub mod logging;
pub mod notify;
pub mod player;
pub mod registration;
pub mod reminder;
pub mod types;
pub mod write_guard;
