pub mod confidence;
pub mod dataset;
pub mod math;
pub mod modification;
pub mod protein;
pub mod sequence;

pub use confidence::Confidence;
pub use dataset::{Dataset, GroupComparison, PeptideMatch};
pub use modification::Modification;
pub use protein::Protein;
pub use sequence::PeptideSequence;
