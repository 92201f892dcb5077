//! Champion catalog engine. Keep this crate free of IO and platform concerns.

pub mod champion;
pub mod facets;
pub mod filter;
pub mod infer;
pub mod placeholder;
pub mod range;
pub mod record;
pub mod slots;
pub mod stats;
pub mod tags;

pub use champion::*;
pub use facets::*;
pub use filter::*;
pub use infer::*;
pub use placeholder::*;
pub use range::*;
pub use record::*;
pub use slots::*;
pub use stats::*;
pub use tags::*;
