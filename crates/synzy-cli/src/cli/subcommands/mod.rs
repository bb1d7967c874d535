pub mod compare;
pub mod config;
pub mod session;

pub use compare::CompareCommands;
pub use config::ConfigCommands;
pub use session::SessionCommands;
