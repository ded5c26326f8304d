#![deny(missing_docs)]
//! Tourwise core library.
//!
//! Multi-provider AI orchestration for a tourism-assistance backend:
//! media normalization, capability adapters, deterministic fallbacks,
//! per-capability pipelines, and activity logging.

/// Activity log writer and history reader.
pub mod activity;
/// HTTP surface (routes, state, error envelope).
pub mod api;
/// Configuration and settings management.
pub mod config;
/// Deterministic local fallback strategies.
pub mod fallback;
/// Media payload normalization (images and audio).
pub mod media;
/// Per-capability pipeline orchestrators.
pub mod pipelines;
/// External AI provider adapters.
pub mod providers;
/// Normalized result types shared across capabilities.
pub mod types;
