//! Seeding for kchain
//!
//! Exact k-mer matches between query and reference are the starting points
//! for extension and chaining.

pub mod finder;
pub mod index;
pub mod utils;

pub use finder::{AnchorFinder, Orientation};
pub use index::KmerIndex;
