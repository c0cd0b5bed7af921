//! Pattern string utilities
//!
//! A regex cannot define the same group name twice. Event patterns for one
//! sequence level all use the same field names (`position`, `start`, `end`,
//! ...), so before they are joined into one alternation every inner group name
//! is scoped by the pattern's outermost group name. Patterns embedded in a
//! repeated construct lose their group names entirely.

use once_cell::sync::Lazy;
use regex::Regex;

static GROUP_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\?P<(\w+)>").unwrap());

/// Join patterns into a single alternation with globally unique group names
///
/// Every inner group name is prefixed with the name of the first group in its
/// pattern, so `(?P<sub>(?P<position>[1-9][0-9]*)...)` becomes
/// `(?P<sub>(?P<sub_position>[1-9][0-9]*)...)`. Each input pattern is assumed
/// to be wrapped in its own named group.
///
/// The alternation is wrapped in a group named `group_name`, or in a
/// non-capturing group when `group_name` is `None`.
pub fn combine_patterns<S: AsRef<str>>(patterns: &[S], group_name: Option<&str>) -> String {
    let body = patterns
        .iter()
        .map(|p| scope_group_names(p.as_ref()))
        .collect::<Vec<_>>()
        .join("|");

    match group_name {
        Some(name) => format!("(?P<{}>{})", name, body),
        None => format!("(?:{})", body),
    }
}

/// Replace every named group with a non-capturing group
pub fn remove_named_groups(pattern: &str) -> String {
    GROUP_NAME.replace_all(pattern, "(?:").into_owned()
}

fn scope_group_names(pattern: &str) -> String {
    let mut names = GROUP_NAME
        .captures_iter(pattern)
        .filter_map(|caps| caps.get(1));

    let Some(outer) = names.next() else {
        return pattern.to_string();
    };
    let scope = format!("{}_", outer.as_str());

    let mut scoped = String::with_capacity(pattern.len() * 2);
    let mut copied = 0;
    for name in names {
        scoped.push_str(&pattern[copied..name.start()]);
        scoped.push_str(&scope);
        copied = name.start();
    }
    scoped.push_str(&pattern[copied..]);
    scoped
}
