pub mod pipeline;
pub mod validator;

pub use pipeline::{align_files, AlignmentOutput, AlignmentPipeline};
pub use validator::{TimelineValidator, ValidationResult, ValidationStats};
