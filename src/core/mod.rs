pub mod config;
pub mod identity;
pub mod import;
pub mod layout;
pub mod log;
pub mod normalize;
pub mod settings;
pub mod stats;
pub mod weeks;
pub mod workers;
