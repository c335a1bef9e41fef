//! Error handling for the gizmo engine
//!
//! Geometry that degenerates during a drag is not an error: the kernel returns
//! `None` and the frame is skipped. The errors here cover caller input that the
//! engine cannot work with at all (bad viewports, non-finite matrices, ...).

use thiserror::Error;

#[cfg(feature = "tracing")]
use tracing::warn;

/// Result type for gizmo operations
pub type GuizmoResult<T> = Result<T, GuizmoError>;

/// Errors that can occur when feeding the gizmo engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GuizmoError {
    /// Invalid matrix data
    #[error("Invalid matrix data: {reason}")]
    InvalidMatrix {
        /// The reason why the matrix is invalid
        reason: String,
    },

    /// Invalid viewport configuration
    #[error("Invalid viewport: {reason}")]
    InvalidViewport {
        /// The reason why the viewport is invalid
        reason: String,
    },

    /// Invalid operation attempted
    #[error("Invalid operation: {operation}")]
    InvalidOperation {
        /// The invalid operation that was attempted
        operation: String,
    },

    /// Invalid bounding box
    #[error("Invalid bounds: {reason}")]
    InvalidBounds {
        /// The reason why the bounds are invalid
        reason: String,
    },

    /// Style configuration error
    #[error("Style configuration error: {setting}")]
    StyleConfiguration {
        /// The style setting that caused the error
        setting: String,
    },
}

impl GuizmoError {
    /// Create an invalid matrix error
    pub fn invalid_matrix(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        #[cfg(feature = "tracing")]
        warn!("Invalid matrix data: {}", reason);
        Self::InvalidMatrix { reason }
    }

    /// Create an invalid viewport error
    pub fn invalid_viewport(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        #[cfg(feature = "tracing")]
        warn!("Invalid viewport: {}", reason);
        Self::InvalidViewport { reason }
    }

    /// Create an invalid operation error
    pub fn invalid_operation(operation: impl Into<String>) -> Self {
        let operation = operation.into();
        #[cfg(feature = "tracing")]
        warn!("Invalid operation: {}", operation);
        Self::InvalidOperation { operation }
    }

    /// Create an invalid bounds error
    pub fn invalid_bounds(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        #[cfg(feature = "tracing")]
        warn!("Invalid bounds: {}", reason);
        Self::InvalidBounds { reason }
    }

    /// Create a style configuration error
    pub fn style_configuration(setting: impl Into<String>) -> Self {
        let setting = setting.into();
        #[cfg(feature = "tracing")]
        warn!("Style configuration error: {}", setting);
        Self::StyleConfiguration { setting }
    }
}

/// Macro for conditional tracing
#[macro_export]
macro_rules! guizmo_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::trace!($($arg)*);
    };
}

/// Macro for conditional debug logging
#[macro_export]
macro_rules! guizmo_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    };
}
