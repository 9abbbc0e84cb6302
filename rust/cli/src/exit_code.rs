//! Exit code constants for the CLI application.

/// Success exit code (standard Unix convention).
pub const SUCCESS: i32 = 0;

/// General error exit code: bad arguments, bad config, failed command.
pub const ERROR: i32 = 2;

/// Input closed before the game finished.
pub const INTERRUPTED: i32 = 130;
