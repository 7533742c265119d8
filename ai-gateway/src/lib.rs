//! AI Gateway for the Verbomed journal
//!
//! Thin client over a hosted chat-completion API, used for three things:
//!
//! - clinical summaries of free-text notes (`summarize`)
//! - plain-language translation of medical terminology
//!   (`translate_plain_language`)
//! - description of uploaded medical documents and images by signed URL
//!   (`analyze_image`)
//!
//! The client is explicitly constructed from [`AiConfig`] and holds no
//! global state. Every call is a single attempt; upstream failures are
//! reported as typed [`AiError`] values and callers decide what to show
//! the user.

pub mod cleanup;
pub mod client;
pub mod config;
pub mod error;

pub use client::AiGatewayClient;
pub use config::AiConfig;
pub use error::{AiError, AiResult};
