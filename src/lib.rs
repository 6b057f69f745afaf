pub mod config;
pub mod error;
pub mod layout;
pub mod practice;
pub mod render;
// cmd, reports and terminal are binary modules (see main.rs).
