pub mod bootstrap;
pub mod config;
pub mod store;

pub use bootstrap::*;
pub use config::*;
pub use store::*;
