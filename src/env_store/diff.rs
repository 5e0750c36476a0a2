use std::collections::{HashMap, HashSet};

use super::{ChangeSource, EnvChange, EnvValue};

/// Compares two mappings and produces one change per key that differs.
///
/// Walks the union of both key sets. Keys present on only one side
/// become additions (`old_value: None`) or removals (`new_value: None`).
pub fn diff_maps(
    old: &HashMap<String, EnvValue>,
    new: &HashMap<String, EnvValue>,
    source: ChangeSource,
) -> Vec<EnvChange> {
    let mut keys: HashSet<&String> = old.keys().collect();
    keys.extend(new.keys());

    let mut changes = Vec::new();
    for key in keys {
        let old_value = old.get(key);
        let new_value = new.get(key);

        if let (Some(before), Some(after)) = (old_value, new_value) {
            if equivalent(before, after) {
                continue;
            }
        }

        changes.push(EnvChange::new(
            key.clone(),
            old_value.cloned(),
            new_value.cloned(),
            source,
        ));
    }

    changes
}

/// A reload resets memoised scalars back to `Str`; when the raw text
/// still coerces to the same payload the value did not observably change.
fn equivalent(old: &EnvValue, new: &EnvValue) -> bool {
    old == new || new.coerce(old.value_type()).as_ref() == Some(old)
}
