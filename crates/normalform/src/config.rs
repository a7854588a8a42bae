//! Conversion configuration types.

use crate::error::{ConversionError, Result};
use crate::time_compat::Instant;
use std::time::Duration;

/// Resource budget for a single conversion request
///
/// CNF/DNF distribution can grow exponentially; the budget turns a runaway
/// conversion into a `ResourceExceeded` error instead of a hang.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionConfig {
    /// Maximum number of formula nodes any intermediate result may have
    pub max_nodes: Option<usize>,
    /// Wall-clock limit for the whole request
    pub timeout: Option<Duration>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        ConversionConfig {
            max_nodes: Some(100_000),
            timeout: None,
        }
    }
}

impl ConversionConfig {
    /// No node or time limit at all
    pub fn unbounded() -> Self {
        ConversionConfig {
            max_nodes: None,
            timeout: None,
        }
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Start the clock for one request
    pub fn budget(&self) -> Budget {
        Budget {
            started: Instant::now(),
            timeout: self.timeout,
            max_nodes: self.max_nodes,
        }
    }
}

/// Request-scoped budget tracker
#[derive(Debug, Clone, Copy)]
pub struct Budget {
    started: Instant,
    timeout: Option<Duration>,
    max_nodes: Option<usize>,
}

impl Budget {
    pub fn unbounded() -> Self {
        ConversionConfig::unbounded().budget()
    }

    pub fn check_timeout(&self) -> Result<()> {
        if let Some(timeout) = self.timeout {
            if self.started.elapsed() >= timeout {
                log::warn!("conversion exceeded its time budget of {:?}", timeout);
                return Err(ConversionError::ResourceExceeded {
                    resource: "time".to_string(),
                    limit: format!("{}ms", timeout.as_millis()),
                });
            }
        }
        Ok(())
    }

    pub fn check_nodes(&self, nodes: usize) -> Result<()> {
        if let Some(limit) = self.max_nodes {
            if nodes > limit {
                log::warn!("conversion produced {} nodes, budget is {}", nodes, limit);
                return Err(ConversionError::ResourceExceeded {
                    resource: "node".to_string(),
                    limit: limit.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Check both limits
    pub fn check(&self, nodes: usize) -> Result<()> {
        self.check_timeout()?;
        self.check_nodes(nodes)
    }
}
