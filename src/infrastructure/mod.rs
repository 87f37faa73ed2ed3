//! Infrastructure layer module
//!
//! This module contains the adapters behind the domain ports:
//! - Bedrock runtime client and the six provider adapters + registry
//! - UCI engine process adapter for the deterministic fallback
//! - Configuration management
//! - Logging infrastructure
//!
//! Infrastructure implementations satisfy the port traits defined in the
//! domain layer.

pub mod bedrock;
pub mod config;
pub mod logging;
pub mod uci;
