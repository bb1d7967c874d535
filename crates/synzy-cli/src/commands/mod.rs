pub mod compare;
pub mod config;
pub mod dispatch;
pub mod rank;
pub mod session;
pub mod shared;
