//! crates/logging-config/src/keys.rs
//! Configuration key names, key templates, reserved names and built-in defaults.

/// Placeholder substituted with a logger or sink name inside key templates.
pub const WILDCARD: &str = "*";

/// Comma-separated list of loggers created in addition to the root logger.
pub const LOGGER_NAMES_KEY: &str = "custom_logger_names";
/// `"1"` selects an asynchronous logger.
pub const LOGGER_ASYNC_KEY: &str = "*_async";
/// Level name for a logger.
pub const LOGGER_LEVEL_KEY: &str = "*_level";
/// Pattern string for a logger.
pub const LOGGER_FORMAT_KEY: &str = "*_format";
/// Comma-separated sink names for a logger.
pub const LOGGER_SINKS_KEY: &str = "*_sinks";

/// Suffix appended to a sink name to find its kind discriminator.
pub const SINK_SUFFIX: &str = "_sink";
/// Sink kind discriminator for a sink.
pub const SINK_KIND_KEY: &str = "*_sink";
/// File path (without extension) of a file sink.
pub const FILE_FULL_NAME_KEY: &str = "*_full_name";
/// Size in bytes after which a file sink rotates.
pub const FILE_SIZE_KEY: &str = "*_size";
/// Number of rotated files a file sink keeps.
pub const FILE_ROTATE_NUM_KEY: &str = "*_rotate_num";
/// `"0"` disables flushing after every record.
pub const FILE_FORCE_FLUSH_KEY: &str = "*_force_flush";

/// Name of the logger that always exists and supplies fallback settings.
pub const ROOT_LOGGER_NAME: &str = "root_logger";
/// Sink name whose settings back every other file sink.
pub const DEFAULT_FILE_SINK_NAME: &str = "file";
/// Logical name of the console sink.
pub const CONSOLE_SINK_NAME: &str = "console";
/// Config file tried from the working directory when nothing else was supplied.
pub const DEFAULT_CONFIG_FILE: &str = "logwire.conf";

/// Discriminator value selecting the console sink.
pub const SINK_KIND_CONSOLE: &str = "Console";
/// Discriminator value selecting the rotating file sink.
pub const SINK_KIND_ROTATING_FILE: &str = "RotateFile";
/// Alternate spelling accepted for the rotating file sink.
pub const SINK_KIND_ROTATING_FILE_ALT: &str = "RotatingFile";

/// Default pattern of the root logger.
pub const DEFAULT_FORMAT: &str = "[%Y-%m-%d %H:%M:%S.%e]-[%l]- %v (#f ##l #F)";

/// Built-in configuration. Every store contains at least these keys.
pub const DEFAULTS: &[(&str, &str)] = &[
    (LOGGER_NAMES_KEY, ""),
    ("root_logger_async", "0"),
    ("root_logger_level", "debug"),
    ("root_logger_format", DEFAULT_FORMAT),
    ("root_logger_sinks", "console,file"),
    ("console_sink", SINK_KIND_CONSOLE),
    ("file_sink", SINK_KIND_ROTATING_FILE),
    ("file_full_name", "./defaultLog"),
    ("file_size", "1048576"),
    ("file_rotate_num", "3"),
    ("file_force_flush", "1"),
];

/// Substitutes the wildcard in `template` with `name`.
///
/// ```
/// use logging_config::keys::{LOGGER_LEVEL_KEY, expand};
///
/// assert_eq!(expand(LOGGER_LEVEL_KEY, "root_logger"), "root_logger_level");
/// ```
pub fn expand(template: &str, name: &str) -> String {
    template.replacen(WILDCARD, name, 1)
}

/// Splits a comma-separated name list.
///
/// Segments are trimmed, empty segments are dropped and duplicates removed.
/// The result is sorted so iteration order does not depend on the input.
pub fn parse_name_list(names: &str) -> Vec<String> {
    let mut parsed: Vec<String> = names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect();
    parsed.sort();
    parsed.dedup();
    parsed
}
