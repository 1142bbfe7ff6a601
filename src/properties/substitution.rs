//! `${name}` reference replacement across the store.
//!
//! Runs once after all files are applied, when enabled. References resolve
//! against the store as it stood before the pass started. Each value is
//! resolved a single time; a reference whose replacement contains another
//! reference is not expanded again.

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::properties::store::PropertyStore;

/// Store key that enables the replacement pass when set to `true`.
pub const REPLACE_FLAG_KEY: &str = "properties.replace";

/// True if the store itself asks for the replacement pass.
pub fn replace_flag_set(store: &dyn PropertyStore) -> bool {
    store
        .get(REPLACE_FLAG_KEY)
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

/// Replace `${name}` and `${name:-default}` references in `value`.
///
/// Unresolvable references without a default are left verbatim.
pub fn resolve<'a, F>(value: &'a str, lookup: F) -> Cow<'a, str>
where
    F: Fn(&str) -> Option<String>,
{
    if !value.contains("${") {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            rest = "";
            break;
        };

        let reference = &after[..end];
        let (name, default) = match reference.split_once(":-") {
            Some((name, default)) => (name, Some(default)),
            None => (reference, None),
        };

        match lookup(name) {
            Some(found) => out.push_str(&found),
            None => match default {
                Some(default) => out.push_str(default),
                None => out.push_str(&rest[start..start + 2 + end + 1]),
            },
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);

    Cow::Owned(out)
}

/// Run the replacement pass over every store entry.
///
/// Returns the number of entries whose value changed.
pub fn substitute(store: &dyn PropertyStore) -> usize {
    let snapshot: BTreeMap<String, String> = store.snapshot();
    let mut changed = 0;

    for (key, value) in &snapshot {
        let resolved = resolve(value, |name| snapshot.get(name).cloned());
        if resolved.as_ref() != value.as_str() {
            tracing::debug!(key = %key, value = %resolved, "Replaced property references");
            store.set(key, &resolved);
            changed += 1;
        }
    }

    changed
}
