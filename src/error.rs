//! Error types.

use crate::node::NodeId;
use std::io;
use thiserror::Error;

/// Failures reported by a [`Surface`](crate::surface::Surface).
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The node is not attached to the surface.
    #[error("node {0} is not attached to the surface")]
    UnknownNode(NodeId),

    /// Writing to the terminal failed.
    #[error("terminal output failed: {0}")]
    Io(#[from] io::Error),
}

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Speed multiplier must be finite and positive.
    #[error("speed multiplier must be finite and > 0, got {0}")]
    SpeedMultiplier(f64),

    /// Typo probability must be within `[0, 1]`.
    #[error("typo probability must be between 0.0 and 1.0, got {0}")]
    TypoProbability(f64),

    /// Typo run bounds are unusable.
    #[error("typo run length range {min}..{max} is empty or starts at 0")]
    TypoRun {
        /// Smallest run length.
        min: usize,
        /// Exclusive upper bound.
        max: usize,
    },
}

/// Top-level error for the typing engine.
#[derive(Debug, Error)]
pub enum TypistError {
    /// A surface mutation failed and the run was aborted.
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, TypistError>;
