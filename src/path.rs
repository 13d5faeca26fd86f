//! Route composition.
//!
//! Joins class-level and method-level path fragments into one route with a
//! single leading separator and no doubled separators, then collapses the
//! legacy `/*/` wildcard segment.

use heck::ToKebabCase;

const SEPARATOR: char = '/';
const WILDCARD_SEGMENT: &str = "/*/";

/// Joins path fragments into normalized routes.
pub struct PathComposer;

impl PathComposer {
    /// Derives a route from a controller name when none is declared,
    /// e.g. `PetController` -> `/pet-controller`.
    pub fn default_fragment(controller_name: &str) -> String {
        format!("{}{}", SEPARATOR, controller_name.to_kebab_case())
    }

    /// Composes fragments into one route.
    ///
    /// Empty fragments are skipped. The wildcard collapse runs once on the
    /// fully joined string.
    pub fn compose<S: AsRef<str>>(fragments: &[S]) -> String {
        let mut joined = String::new();
        for fragment in fragments.iter().map(AsRef::as_ref) {
            if fragment.is_empty() {
                continue;
            }
            if joined.is_empty() {
                joined.push_str(fragment);
            } else {
                let base_len = joined.trim_end_matches(SEPARATOR).len();
                joined.truncate(base_len);
                joined.push(SEPARATOR);
                joined.push_str(fragment.trim_start_matches(SEPARATOR));
            }
        }
        Self::collapse_wildcards(&Self::normalize(&joined))
    }

    /// Ensures one leading separator and removes repeated separators.
    pub fn normalize(route: &str) -> String {
        let mut normalized = String::with_capacity(route.len() + 1);
        normalized.push(SEPARATOR);
        for c in route.chars() {
            if c == SEPARATOR && normalized.ends_with(SEPARATOR) {
                continue;
            }
            normalized.push(c);
        }
        normalized
    }

    /// Removes every bare `*` segment that sits between two separators.
    ///
    /// Idempotent: applying it to its own output changes nothing.
    pub fn collapse_wildcards(route: &str) -> String {
        let mut collapsed = route.to_string();
        while let Some(idx) = collapsed.find(WILDCARD_SEGMENT) {
            collapsed.replace_range(idx..idx + WILDCARD_SEGMENT.len(), "/");
        }
        collapsed
    }
}
