//! Standard exit codes (BSD sysexits.h compatible, plus a generic failure)

/// Alias conflict, unknown alias, or I/O failure
pub const FAILURE: i32 = 1;

/// Command line usage error
pub const USAGE: i32 = 64;

/// Data format error (SSH config present but unparsable)
pub const DATAERR: i32 = 65;

/// Configuration error
pub const CONFIG: i32 = 78;
