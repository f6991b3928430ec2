//! Unified error type system for the Multipaste desktop application.
//!
//! This module provides a centralized error handling approach, replacing scattered
//! String-based error returns with a typed `AppError` enum.

use std::fmt;

/// Unified application error type.
///
/// This enum represents all possible error scenarios across the application,
/// organized by domain (Clipboard, Storage, Config, Shortcut, Window, etc.).
#[derive(Debug, Clone)]
pub enum AppError {
    /// Clipboard-related errors (reading, writing, format conversion)
    Clipboard(String),

    /// Storage/database errors (SQLite, Diesel, file system)
    Storage(String),

    /// Configuration errors (loading, parsing, validation)
    Config(String),

    /// Global shortcut errors (registration, teardown)
    Shortcut(String),

    /// Webview window errors (creation, show/hide, focus)
    Window(String),

    /// I/O errors (file read/write, permissions)
    Io(String),

    /// Generic/internal errors that don't fit other categories
    Internal(String),
}

impl AppError {
    /// Create a clipboard error with a message.
    pub fn clipboard(msg: impl Into<String>) -> Self {
        Self::Clipboard(msg.into())
    }

    /// Create a storage error with a message.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a config error with a message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a shortcut error with a message.
    pub fn shortcut(msg: impl Into<String>) -> Self {
        Self::Shortcut(msg.into())
    }

    /// Create a window error with a message.
    pub fn window(msg: impl Into<String>) -> Self {
        Self::Window(msg.into())
    }

    /// Create an I/O error with a message.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Create an internal error with a message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the error message as a string slice.
    pub fn message(&self) -> &str {
        match self {
            AppError::Clipboard(msg) => msg,
            AppError::Storage(msg) => msg,
            AppError::Config(msg) => msg,
            AppError::Shortcut(msg) => msg,
            AppError::Window(msg) => msg,
            AppError::Io(msg) => msg,
            AppError::Internal(msg) => msg,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Clipboard(msg) => write!(f, "Clipboard error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Config(msg) => write!(f, "Config error: {}", msg),
            AppError::Shortcut(msg) => write!(f, "Shortcut error: {}", msg),
            AppError::Window(msg) => write!(f, "Window error: {}", msg),
            AppError::Io(msg) => write!(f, "I/O error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Convert from `anyhow::Error` to `AppError`.
///
/// This implementation preserves the error message and categorizes
/// anyhow errors as internal errors.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert from `diesel::result::Error` to `AppError`.
impl From<diesel::result::Error> for AppError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => AppError::storage("Record not found in database"),
            diesel::result::Error::DatabaseError(kind, info) => {
                AppError::storage(format!("Database error: {:?}: {}", kind, info.message()))
            }
            _ => AppError::storage(format!("Database error: {}", err)),
        }
    }
}

/// Convert from `std::io::Error` to `AppError`.
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::io(err.to_string())
    }
}

/// Convert from `diesel::r2d2::PoolError` to `AppError`.
impl From<diesel::r2d2::PoolError> for AppError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        AppError::storage(format!("Connection pool error: {}", err))
    }
}

/// Convert from `serde_json::Error` to `AppError`.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::config(format!("JSON error: {}", err))
    }
}

/// Convert from `tauri::Error` to `AppError`.
impl From<tauri::Error> for AppError {
    fn from(err: tauri::Error) -> Self {
        AppError::window(err.to_string())
    }
}

/// Convert from `AppError` to `String`.
///
/// This implementation is used for Tauri command return values,
/// which require errors to be String type.
impl From<AppError> for String {
    fn from(err: AppError) -> Self {
        err.to_string()
    }
}

/// Type alias for Result with AppError.
pub type Result<T> = std::result::Result<T, AppError>;
