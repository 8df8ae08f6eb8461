//! Constants used throughout the fractree library.
//!
//! This module provides central definitions for the serialized record keys,
//! the address syntax defaults and the extras keys the engine understands.

/// Record key holding a node's name.
pub const NAME: &str = "?NAME";

/// Record key holding a node's value, omitted when unset.
pub const VALUE: &str = "?VALUE";

/// Record key holding the ordered child records, omitted when there are none.
pub const CHILDREN: &str = "?CHILDREN";

/// Record key holding the extras map, omitted when empty.
pub const EXTRAS: &str = "?EXTRAS";

/// Record key holding a class tag, present only where a node's class differs from its parent's.
pub const TYPE_TAG: &str = "?TYPE";

/// Top-level record key holding the format version.
pub const FORMAT_VERSION_KEY: &str = "?FORMAT_VERSION";

/// Top-level record key holding whole-tree metadata.
pub const ROOT_DATA: &str = "?ROOT_DATA";

/// Current record format version.
pub const FORMAT_VERSION: u32 = 0;

/// Joins the class name and module of a serialized type tag.
pub const TYPE_TAG_SEPARATOR: &str = "|@|";

/// Default address separator.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Default parent-navigation token.
pub const DEFAULT_PARENT_TOKEN: &str = "^";

/// Extras key: value returned (and cached) when a node's value is unset.
pub const EXTRA_DEFAULT: &str = "default";

/// Extras key: forbids implicit child creation during path resolution.
pub const EXTRA_READ_ONLY: &str = "readOnly";

/// Extras key: advisory active flag.
pub const EXTRA_ACTIVE: &str = "active";

/// Extras key: advisory breakpoint flag.
pub const EXTRA_BREAKPOINT: &str = "breakpoint";

/// Extras keys with a defined meaning to the engine.
pub const EXTRA_KEYS: [&str; 4] = [
    EXTRA_DEFAULT,
    EXTRA_READ_ONLY,
    EXTRA_ACTIVE,
    EXTRA_BREAKPOINT,
];
