pub mod ids;
pub mod model;
pub mod pending;

pub use ids::*;
pub use model::*;
pub use pending::*;
