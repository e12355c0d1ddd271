pub mod config;
pub mod db;
pub mod export;
pub mod import;
pub mod init;
pub mod log;
pub mod settings;
pub mod week;
pub mod weeks;
pub mod worker;
pub mod workers;
