//! Process exit codes. Part of the CLI contract.

pub const SUCCESS: i32 = 0;
pub const SCENARIO_FAILED: i32 = 1; // A scenario could not be evaluated (missing rate, bad area)
pub const CONFIG_ERROR: i32 = 2; // Settings/workspace unreadable or invalid, bad arguments
