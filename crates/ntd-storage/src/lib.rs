pub mod error;
pub mod memory;
pub mod session;
pub mod traits;

pub use error::*;
pub use memory::*;
pub use session::*;
pub use traits::*;
