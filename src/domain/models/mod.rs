//! Domain models for the move-acquisition core.

pub mod attempt;
pub mod config;
pub mod position;
pub mod sampling;

pub use attempt::{AttemptRecord, MoveCandidate, MoveRequest, MoveResult, MoveSource};
pub use config::{
    AcquisitionPolicy, BedrockConfig, Config, EngineConfig, LoggingConfig, PolicyConfig,
    PolicyProfile, DEFAULT_JUSTIFIER_MODEL,
};
pub use position::{IllegalMove, Position, PositionError, SanHistory};
pub use sampling::{EscalationPolicy, SamplingConfig};
