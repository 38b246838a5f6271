//! Container/list aggregator.
//!
//! Runs after parsing, and again after any edit, to restore every
//! parent-dependent figure:
//!
//! 1. **Leaves under lists** combine their own modifier totals with those of
//!    every enclosing `LIST`, recompute from `true_base_cost` (list END
//!    modifiers included), then take the lists' flat discount:
//!    `real = max(0, real + discount)`.
//! 2. **Children of skill enhancers** cost one point less, never below 1.
//! 3. **Lists and compound powers** roll up the base, active and real cost of
//!    their direct children, deepest containers first.
//!
//! Every step starts from stored inputs, so running the pass twice changes
//! nothing.

use crate::cost::{self, Modifier, ModifierTotals, round_cost};
use crate::model::{Character, CostEntry, EntryList};

/// Re-runs the aggregation pass over every category of `character`.
pub fn aggregate_character(character: &mut Character) {
    aggregate(&mut character.skills);
    aggregate(&mut character.perks);
    aggregate(&mut character.talents);
    aggregate(&mut character.martial_arts);
    aggregate(&mut character.powers);
    aggregate(&mut character.disadvantages);
    aggregate(&mut character.equipment);
}

/// Aggregates one category list in place.
pub fn aggregate<T: CostEntry>(list: &mut EntryList<T>) {
    apply_parent_adjustments(list);
    roll_up_containers(list);
}

/// What the enclosing entries impose on one leaf.
struct Inherited {
    totals: ModifierTotals,
    modifiers: Vec<Modifier>,
    discount: f64,
    enhanced: bool,
}

fn inherited<T: CostEntry>(list: &EntryList<T>, index: usize) -> Option<Inherited> {
    let ancestors = list.ancestors(index);
    let items = list.as_slice();

    let enhanced = ancestors
        .first()
        .is_some_and(|&parent| items[parent].entry().is_enhancer());
    let groups: Vec<_> = ancestors
        .iter()
        .map(|&i| items[i].entry())
        .filter(|e| e.is_group())
        .collect();
    if groups.is_empty() && !enhanced {
        return None;
    }

    let totals = groups
        .iter()
        .fold(items[index].entry().totals(), |acc, group| {
            acc.combine(group.totals())
        });
    let discount = groups.iter().map(|group| cost::discount(&group.adders)).sum();
    let modifiers = groups
        .iter()
        .flat_map(|group| group.modifiers.iter().cloned())
        .collect();
    Some(Inherited {
        totals,
        modifiers,
        discount,
        enhanced,
    })
}

fn apply_parent_adjustments<T: CostEntry>(list: &mut EntryList<T>) {
    for index in 0..list.len() {
        if list.as_slice()[index].entry().rolls_up() {
            continue;
        }
        let Some(inherited) = inherited(list, index) else {
            continue;
        };

        let item = &mut list.as_mut_slice()[index];
        item.recompute_under(inherited.totals, &inherited.modifiers);

        let entry = item.entry_mut();
        if inherited.discount != 0.0 {
            entry.real_cost = round_cost((f64::from(entry.real_cost) + inherited.discount).max(0.0));
        }
        if inherited.enhanced && entry.real_cost > 1 {
            entry.real_cost -= 1;
        }
        tracing::trace!(
            id = %entry.id,
            real_cost = entry.real_cost,
            "recomputed under parent"
        );
    }
}

fn roll_up_containers<T: CostEntry>(list: &mut EntryList<T>) {
    let mut containers: Vec<(usize, usize)> = list
        .iter()
        .enumerate()
        .filter(|(_, item)| item.entry().rolls_up())
        .map(|(index, _)| (list.ancestors(index).len(), index))
        .collect();
    // Deepest first so nested containers are settled before their parents.
    containers.sort_by(|a, b| b.0.cmp(&a.0));

    for (_, index) in containers {
        let id = list.as_slice()[index].entry().id.clone();
        let mut children = list.children_of(&id).map(CostEntry::entry).peekable();
        let container = list.as_slice()[index].entry();
        if container.is_group() && children.peek().is_none() {
            continue;
        }

        let mut base = 0;
        let mut true_base = 0.0;
        let mut active = None;
        let mut real = 0;
        let mut end = None;
        for child in children {
            if child.id == id {
                continue;
            }
            base += child.base_cost;
            true_base += child.true_base_cost;
            real += child.real_cost;
            if let Some(child_active) = child.active_cost {
                active = Some(active.unwrap_or(0) + child_active);
            }
            if let Some(child_end) = child.end_cost {
                end = Some(end.unwrap_or(0) + child_end);
            }
        }
        let is_container = container.is_container();

        let entry = list.as_mut_slice()[index].entry_mut();
        entry.base_cost = base;
        entry.true_base_cost = true_base;
        entry.active_cost = active;
        entry.real_cost = real;
        entry.end_cost = if is_container { end } else { None };
        tracing::trace!(id = %id, real_cost = real, "rolled up container");
    }
}
