//! HTTP request handlers

pub mod ai;
pub mod health;
pub mod journal;
pub mod speech;
