//! # Foamview Core
//!
//! Core data models, error types, and configuration for the foamview preview
//! system. This crate defines the canonical types that all other crates
//! depend on.
//!
//! ## Architecture Principles
//!
//! - **No External Crate Dependencies Beyond Serialization**: Only serde + basic Rust stdlib
//! - **Type-Driven Design**: Strong types replace string-based APIs
//! - **Zero Panic in Libraries**: All errors are `Result<T, Error>`
//! - **Immutable by Default**: Resources are read-only to consumers
//!
//! ## Core Modules
//!
//! - [`models`] - Workspace note types (Resource, Section, LineRange, etc.)
//! - [`error`] - Error types and Result alias
//! - [`config`] - Workspace and render configuration structures
//! - [`workspace`] - The index interface the preview pipeline resolves against

pub mod config;
pub mod error;
pub mod models;
pub mod workspace;

pub use config::{RenderConfig, SectionSlicing, WorkspaceConfig, WorkspaceConfigBuilder};
pub use error::{Error, Result};
pub use models::{LineIndex, LineRange, ResolvedLink, Resource, Section};
pub use workspace::WorkspaceIndex;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{RenderConfig, SectionSlicing, WorkspaceConfig};
    pub use crate::error::{Error, Result};
    pub use crate::models::{LineIndex, LineRange, ResolvedLink, Resource, Section};
    pub use crate::workspace::WorkspaceIndex;
}
