//! Console driver for local testing

use parley_shared::Driver;

/// Reads messages from the terminal; needs no configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleDriver;

impl Driver for ConsoleDriver {}
