pub mod config;
pub mod detect;
pub mod generate;
pub mod init;
pub mod plugins;
