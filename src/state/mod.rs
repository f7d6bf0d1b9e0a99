/// State management module
///
/// This module handles all gallery state, including:
/// - The in-memory media catalog (catalog.rs)
/// - Shared data structures (data.rs)
/// - The preview modal state machine (session.rs)
/// - Human-readable file sizes (size.rs)

pub mod catalog;
pub mod data;
pub mod session;
pub mod size;
