pub mod config;
pub mod error;
pub mod hash;
pub mod matcher;
pub mod source;
pub mod tracker;

pub use config::*;
pub use error::*;
pub use hash::*;
pub use matcher::*;
pub use source::*;
pub use tracker::*;
