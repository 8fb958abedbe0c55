/// Error code registry for logcat-lens
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 4000-4999: Log source execution errors
/// - 6000-6999: Terminal errors
/// - 7000-7999: Rendering errors
#[allow(dead_code)]
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_PARSE_ERROR: u16 = 1007;
    pub const CONFIG_VALIDATION_FAILED: u16 = 1008;
    pub const CONFIG_INVALID_PATTERN: u16 = 1010;

    // Log source errors (4000-4999)
    pub const SOURCE_GENERIC: u16 = 4000;
    pub const SOURCE_COMMAND_NOT_FOUND: u16 = 4001;
    pub const SOURCE_SUBPROCESS_FAILED: u16 = 4003;
    pub const SOURCE_SPAWN_FAILED: u16 = 4007;
    pub const SOURCE_READ_FAILED: u16 = 4008;
    pub const SOURCE_NONBLOCKING_FAILED: u16 = 4011;

    // Terminal errors (6000-6999)
    pub const TERMINAL_GENERIC: u16 = 6000;
    pub const TERMINAL_RAW_MODE: u16 = 6001;
    pub const TERMINAL_READ_FAILED: u16 = 6002;

    // Rendering errors (7000-7999)
    pub const RENDER_GENERIC: u16 = 7000;
    pub const RENDER_WRITE_FAILED: u16 = 7001;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        ErrorCode::CONFIG_GENERIC => "General configuration error",
        ErrorCode::CONFIG_NOT_FOUND => "Configuration file not found",
        ErrorCode::CONFIG_PARSE_ERROR => "Configuration file could not be parsed as TOML",
        ErrorCode::CONFIG_VALIDATION_FAILED => "Configuration value is out of range or inconsistent",
        ErrorCode::CONFIG_INVALID_PATTERN => "A noise pattern is not a valid regular expression",

        ErrorCode::SOURCE_GENERIC => "General log source error",
        ErrorCode::SOURCE_COMMAND_NOT_FOUND => "Log source program was not found on PATH",
        ErrorCode::SOURCE_SUBPROCESS_FAILED => "Log source command exited unsuccessfully",
        ErrorCode::SOURCE_SPAWN_FAILED => "Log source process could not be started",
        ErrorCode::SOURCE_READ_FAILED => "Reading from the log source failed",
        ErrorCode::SOURCE_NONBLOCKING_FAILED => "Log source output could not be made non-blocking",

        ErrorCode::TERMINAL_GENERIC => "General terminal error",
        ErrorCode::TERMINAL_RAW_MODE => "Terminal raw mode could not be toggled",
        ErrorCode::TERMINAL_READ_FAILED => "Reading a key from the terminal failed",

        ErrorCode::RENDER_GENERIC => "General rendering error",
        ErrorCode::RENDER_WRITE_FAILED => "Writing to standard output failed",

        _ => "Unknown error code",
    }
}
