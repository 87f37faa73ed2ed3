//! UCI engine process adapter.
//!
//! Spawns the engine binary per query — each invocation constructs its own
//! handles, there is no shared engine session — performs the `uci` /
//! `isready` handshake, then runs the position-then-best-move protocol.
//! The whole query runs under one overall timeout and a bounded line
//! budget so a misbehaving engine cannot hang the fallback path.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::{debug, info};

use crate::domain::models::{EngineConfig, Position};
use crate::domain::ports::{BestMoveEngine, EngineError};

/// Maximum number of lines to read before giving up on a UCI response.
pub const MAX_UCI_LINES: usize = 1000;

/// Deterministic best-move engine backed by a UCI binary.
pub struct UciEngine {
    config: EngineConfig,
}

impl UciEngine {
    /// Create the adapter; the binary is spawned lazily per query.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    async fn query(&self, position: &Position) -> Result<String, EngineError> {
        if !Path::new(&self.config.path).exists() {
            return Err(EngineError::NotFound(self.config.path.clone()));
        }

        let mut session = EngineSession::spawn(&self.config.path)?;
        session.handshake().await?;

        session
            .send(&format!("position fen {}", position.fen()))
            .await?;
        session
            .send(&format!("go depth {}", self.config.depth))
            .await?;
        let best = session.read_bestmove().await?;

        session.shutdown().await;
        Ok(best)
    }
}

#[async_trait]
impl BestMoveEngine for UciEngine {
    async fn best_move(&self, position: &Position) -> Result<String, EngineError> {
        let budget = Duration::from_secs(self.config.timeout_secs);
        let best = tokio::time::timeout(budget, self.query(position))
            .await
            .map_err(|_| EngineError::Timeout(self.config.timeout_secs))??;
        info!(mv = %best, depth = self.config.depth, "engine best move");
        Ok(best)
    }
}

/// One live engine process with line-oriented I/O.
struct EngineSession {
    child: Child,
    stdin: ChildStdin,
    lines: Lines<BufReader<ChildStdout>>,
}

impl EngineSession {
    fn spawn(path: &str) -> Result<Self, EngineError> {
        let mut child = Command::new(path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| EngineError::InitFailed("no stdin handle".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| EngineError::InitFailed("no stdout handle".to_string()))?;

        Ok(Self {
            child,
            stdin,
            lines: BufReader::new(stdout).lines(),
        })
    }

    async fn send(&mut self, command: &str) -> Result<(), EngineError> {
        debug!(%command, "uci >");
        self.stdin.write_all(command.as_bytes()).await?;
        self.stdin.write_all(b"\n").await?;
        self.stdin.flush().await?;
        Ok(())
    }

    async fn next_line(&mut self) -> Result<String, EngineError> {
        self.lines
            .next_line()
            .await?
            .ok_or_else(|| EngineError::InvalidResponse("engine closed stdout".to_string()))
    }

    /// `uci` until `uciok`, then `isready` until `readyok`.
    async fn handshake(&mut self) -> Result<(), EngineError> {
        self.send("uci").await?;
        self.expect("uciok").await?;
        self.send("isready").await?;
        self.expect("readyok").await?;
        Ok(())
    }

    async fn expect(&mut self, marker: &str) -> Result<(), EngineError> {
        for _ in 0..MAX_UCI_LINES {
            if self.next_line().await? == marker {
                return Ok(());
            }
        }
        Err(EngineError::InitFailed(format!(
            "no '{marker}' within {MAX_UCI_LINES} lines"
        )))
    }

    /// Read until `bestmove <move> …` and return the move token.
    async fn read_bestmove(&mut self) -> Result<String, EngineError> {
        for _ in 0..MAX_UCI_LINES {
            let line = self.next_line().await?;
            if let Some(rest) = line.strip_prefix("bestmove ") {
                return rest
                    .split_whitespace()
                    .next()
                    .map(ToString::to_string)
                    .ok_or_else(|| {
                        EngineError::InvalidResponse("empty bestmove line".to_string())
                    });
            }
        }
        Err(EngineError::InvalidResponse(format!(
            "no bestmove within {MAX_UCI_LINES} lines"
        )))
    }

    /// Ask the engine to quit, then make sure the process is gone.
    async fn shutdown(mut self) {
        let _ = self.send("quit").await;
        let _ = self.child.kill().await;
    }
}
