//! Configuration and constants for the profiler and its reports.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Display label for time spent in a method's own body
pub const BODY_LABEL: &str = "(body)";

/// Separator between frames in a collapsed stack line
pub const STACK_SEPARATOR: char = ';';

/// Collapsed stack weights are integral microseconds
pub const MICROS_PER_SECOND: f64 = 1_000_000.0;

// Column widths used by the text dumps
pub const METHOD_COLUMN_WIDTH: usize = 40;
pub const TREE_NAME_WIDTH: usize = 20;
pub const TREE_INDENT_LEVELS: usize = 10;

/// Hot paths included in a report unless asked otherwise
pub const DEFAULT_TOP_PATHS: usize = 10;
