//! Sibling name collision resolution.

/// Returns `name` if it is free, otherwise the first free successor of it.
///
/// One step of succession looks only at the last character:
/// - a digit is incremented as a number (`item1` → `item2`, `b9` → `b10`);
/// - an uppercase ASCII letter advances (`A` → `B`), with `Z` growing an `A` (`Z` → `ZA`);
/// - anything else gets a `B` appended (`a` → `aB`).
///
/// Steps repeat until `is_taken` rejects the candidate. The function is pure.
///
/// ```
/// # use fractree::tree::increment_name;
/// # use std::collections::HashSet;
/// let taken: HashSet<&str> = ["a", "aB"].into_iter().collect();
/// assert_eq!(increment_name("a", |n| taken.contains(n)), "aC");
/// assert_eq!(increment_name("free", |n| taken.contains(n)), "free");
/// ```
pub fn increment_name(name: &str, is_taken: impl Fn(&str) -> bool) -> String {
    let mut candidate = name.to_string();
    while is_taken(&candidate) {
        candidate = successor(&candidate);
    }
    candidate
}

fn successor(name: &str) -> String {
    let Some(last) = name.chars().last() else {
        return "B".to_string();
    };
    let stem = &name[..name.len() - last.len_utf8()];
    if let Some(digit) = last.to_digit(10) {
        format!("{stem}{}", digit + 1)
    } else if last == 'Z' {
        format!("{name}A")
    } else if last.is_ascii_uppercase() {
        let next = (last as u8 + 1) as char;
        format!("{stem}{next}")
    } else {
        format!("{name}B")
    }
}
