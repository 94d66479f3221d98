pub mod analytics;
pub mod collector;
pub mod error;
pub mod hit;
pub mod properties;
pub mod provider;
pub mod version;

pub use analytics::*;
pub use collector::*;
pub use error::*;
pub use hit::*;
pub use properties::*;
pub use provider::*;
pub use version::*;
