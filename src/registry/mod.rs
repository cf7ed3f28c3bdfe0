//! Command registration
//!
//! This module handles:
//! - Holding the commands a bot answers to
//! - Applying (nested) group attributes when commands are registered
//! - Producing snapshots of the registered commands

mod commands;

pub use commands::CommandRegistry;
