//! kchain Core Library
//!
//! Seed-extend-chain alignment of a query DNA sequence against a reference:
//! parallel k-mer indexing, anchor extension, chaining, a secondary seeding
//! pass and the final region list.

pub mod types;
pub mod error;
pub mod params;
pub mod parallel;
pub mod seed;
pub mod extend;
pub mod chain;
pub mod secondary;
pub mod regions;
pub mod format;
pub mod pipeline;

// Re-export commonly used types and functions
pub use types::{Anchor, Region, RegionKind, SeqPos, Strand};
pub use error::{AlignError, AlignResult};
pub use params::{select_kmer_size, AlignParams};
pub use seed::utils::reverse_complement;
pub use chain::{Chain, ChainParams, Chainer};
pub use regions::build_regions;
pub use format::format_regions;
pub use pipeline::{align, Aligner, Alignment, AlignmentStats};

/// Version information for the kchain core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
