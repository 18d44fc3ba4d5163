pub mod analysis;
pub mod block_type;
pub mod error;
pub mod segment;
pub mod validate;

pub use analysis::{BlockAnalysis, analyze_blocks, analyze_segment};
pub use block_type::{BLOCK_TYPES, BlockLanguage};
pub use error::DocumentError;
pub use segment::{Segment, split_blocks};
pub use validate::{IssueLevel, ValidationIssue, validate_document};
