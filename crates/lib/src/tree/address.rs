//! Address tokenizing for path-based node access.
//!
//! An address names a node relative to another one. It may be given as a single
//! separator-joined string (`"branchA.leafA"`), as a sequence of tokens
//! (`["branchA", "leafA"]`), or as a sequence whose items are themselves joined
//! strings (`["branchA.leafA", "^"]`). Every form normalizes to one flat token
//! list through [`IntoAddress`].
//!
//! Normalization follows the same rules for every form:
//! - Empty string "" → no tokens (refers to the starting node)
//! - Leading and trailing separators are dropped: ".a." → `["a"]`
//! - Consecutive separators collapse: "a..b" → `["a", "b"]`
//!
//! ```
//! # use fractree::tree::address::{IntoAddress, join_address};
//! assert_eq!("a.b.c".into_tokens("."), vec!["a", "b", "c"]);
//! assert_eq!(["a.b", "^", "c"].into_tokens("."), vec!["a", "b", "^", "c"]);
//! assert_eq!("a/b".into_tokens("/"), vec!["a", "b"]);
//! assert!("".into_tokens(".").is_empty());
//! assert_eq!(join_address(&["a", "b"], "."), "a.b");
//! ```

/// Splits one address string into its non-empty tokens.
pub fn split_address<'a>(input: &'a str, separator: &'a str) -> impl Iterator<Item = &'a str> {
    input
        .split(separator)
        .filter(|component| !component.is_empty())
}

/// Joins tokens into one address string.
pub fn join_address<S: AsRef<str>>(tokens: &[S], separator: &str) -> String {
    tokens
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Conversion of the accepted address forms into a flat token list.
pub trait IntoAddress {
    /// Normalize into tokens, splitting every item on `separator`.
    fn into_tokens(self, separator: &str) -> Vec<String>;
}

fn flatten<I, S>(items: I, separator: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .flat_map(|item| {
            split_address(item.as_ref(), separator)
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

impl IntoAddress for &str {
    fn into_tokens(self, separator: &str) -> Vec<String> {
        flatten([self], separator)
    }
}

impl IntoAddress for String {
    fn into_tokens(self, separator: &str) -> Vec<String> {
        flatten([self], separator)
    }
}

impl IntoAddress for &String {
    fn into_tokens(self, separator: &str) -> Vec<String> {
        flatten([self], separator)
    }
}

impl<S: AsRef<str>> IntoAddress for &[S] {
    fn into_tokens(self, separator: &str) -> Vec<String> {
        flatten(self, separator)
    }
}

impl<S: AsRef<str>, const N: usize> IntoAddress for [S; N] {
    fn into_tokens(self, separator: &str) -> Vec<String> {
        flatten(self, separator)
    }
}

impl<S: AsRef<str>, const N: usize> IntoAddress for &[S; N] {
    fn into_tokens(self, separator: &str) -> Vec<String> {
        flatten(self, separator)
    }
}

impl<S: AsRef<str>> IntoAddress for Vec<S> {
    fn into_tokens(self, separator: &str) -> Vec<String> {
        flatten(self, separator)
    }
}

impl<S: AsRef<str>> IntoAddress for &Vec<S> {
    fn into_tokens(self, separator: &str) -> Vec<String> {
        flatten(self, separator)
    }
}
