//! Catalog loading, assembly and caching.

pub mod build;
pub mod cache;
pub mod config;
pub mod error;
pub mod load;
pub mod merge;
pub mod schema;
pub mod source;

pub use build::*;
pub use cache::*;
pub use config::*;
pub use error::*;
pub use load::*;
pub use merge::*;
pub use schema::*;
pub use source::*;
