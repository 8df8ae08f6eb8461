//! Metadata applied to nodes created during path resolution.

use crate::{
    constants::{EXTRA_ACTIVE, EXTRA_BREAKPOINT, EXTRA_DEFAULT, EXTRA_READ_ONLY},
    value::{Extras, Value},
};

/// Creation-time extras for nodes that path resolution creates.
///
/// Only the recognized keys (`default`, `readOnly`, `active`, `breakpoint`) are
/// carried. Building from arbitrary key/value pairs ignores every other key.
///
/// ```
/// # use fractree::tree::CreateOptions;
/// # use fractree::Value;
/// let options: CreateOptions = [
///     ("default", Value::from(3)),
///     ("readOnly", Value::from(true)),
///     ("colour", Value::from("ignored")),
/// ]
/// .into_iter()
/// .collect();
/// assert_eq!(options.default, Some(Value::from(3)));
/// assert_eq!(options.read_only, Some(true));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateOptions {
    /// Initial value returned while the node's own value is unset.
    pub default: Option<Value>,
    pub read_only: Option<bool>,
    pub active: Option<bool>,
    pub breakpoint: Option<bool>,
}

impl CreateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = Some(read_only);
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn breakpoint(mut self, breakpoint: bool) -> Self {
        self.breakpoint = Some(breakpoint);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Write the set options into a node's extras.
    pub(crate) fn apply(&self, extras: &mut Extras) {
        if let Some(default) = &self.default {
            extras.insert(EXTRA_DEFAULT.to_string(), default.clone());
        }
        let flags = [
            (EXTRA_READ_ONLY, self.read_only),
            (EXTRA_ACTIVE, self.active),
            (EXTRA_BREAKPOINT, self.breakpoint),
        ];
        for (key, flag) in flags {
            if let Some(flag) = flag {
                extras.insert(key.to_string(), Value::Bool(flag));
            }
        }
    }
}

impl<K, V> FromIterator<(K, V)> for CreateOptions
where
    K: AsRef<str>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = CreateOptions::default();
        for (key, value) in iter {
            let value = value.into();
            match key.as_ref() {
                EXTRA_DEFAULT => options.default = Some(value),
                EXTRA_READ_ONLY => options.read_only = value.as_bool(),
                EXTRA_ACTIVE => options.active = value.as_bool(),
                EXTRA_BREAKPOINT => options.breakpoint = value.as_bool(),
                other => tracing::trace!("Ignoring unrecognized creation option '{other}'"),
            }
        }
        options
    }
}
