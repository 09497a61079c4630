pub mod actions;
pub mod classify;
pub mod coerce;
pub mod effects;
pub mod engine;
pub mod http;
pub mod ids;
pub mod model;
pub mod mutations;
pub mod state;
pub mod time;

pub use actions::*;
pub use classify::*;
pub use effects::*;
pub use engine::*;
pub use http::*;
pub use ids::*;
pub use model::*;
pub use mutations::*;
pub use state::*;
pub use time::*;
