//! Service layer: the acquisition state machine and its helpers.

pub mod acquisition;
pub mod justification;
pub mod prompt_builder;
pub mod response_parser;

pub use acquisition::{AcquisitionState, MoveAcquisitionEngine};
pub use justification::{JustificationSynthesizer, DEFAULT_JUSTIFICATION};
