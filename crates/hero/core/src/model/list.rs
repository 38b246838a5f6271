//! Flat per-category entry arena.
//!
//! Nesting (lists in lists, compound powers holding powers) is expressed with
//! `parent_id` back-references instead of owned children, so parse order
//! never matters and the aggregator can run as a separate pass.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::entry::CostEntry;
use crate::error::LinkError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryList<T> {
    items: Vec<T>,
}

impl<T> Default for EntryList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> EntryList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }
}

impl<T: CostEntry> EntryList<T> {
    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.entry().id == id)
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.entry().id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.entry().id == id)
    }

    /// Appends an entry. Ids must be unique within the list.
    pub fn push(&mut self, item: T) -> Result<(), LinkError> {
        let id = &item.entry().id;
        if self.get(id).is_some() {
            return Err(LinkError::DuplicateId(id.clone()));
        }
        self.items.push(item);
        Ok(())
    }

    /// Direct children of `id`, in list order.
    pub fn children_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a T> + 'a {
        self.items
            .iter()
            .filter(move |item| item.entry().parent_id.as_deref() == Some(id))
    }

    /// Entries that are not inside a list or compound power.
    ///
    /// Children of skill enhancers count as top level since an enhancer does
    /// not roll its children up.
    pub fn top_level(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter().filter(move |item| {
            match item.entry().parent_id.as_deref().and_then(|p| self.get(p)) {
                Some(parent) => !parent.entry().rolls_up(),
                None => true,
            }
        })
    }

    /// Indices of the enclosing entries of `index`, nearest first.
    ///
    /// A parent cycle is cut at the first repeated entry.
    pub fn ancestors(&self, index: usize) -> Vec<usize> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = self.items.get(index);
        seen.insert(index);

        while let Some(parent_id) = current.and_then(|item| item.entry().parent_id.as_deref()) {
            let Some(parent) = self.position(parent_id) else {
                break;
            };
            if !seen.insert(parent) {
                warn!(id = parent_id, "parent cycle detected; ignoring remaining ancestors");
                break;
            }
            chain.push(parent);
            current = self.items.get(parent);
        }
        chain
    }

    /// Removes an entry and returns it.
    ///
    /// Owned children (compound-power members) are removed recursively;
    /// every other child is unparented and stays in the list.
    pub fn remove(&mut self, id: &str) -> Result<T, LinkError> {
        let index = self
            .position(id)
            .ok_or_else(|| LinkError::UnknownEntry(id.to_string()))?;
        let removed = self.items.remove(index);

        let owned: Vec<String> = self
            .children_of(id)
            .filter(|child| child.entry().is_owned())
            .map(|child| child.entry().id.clone())
            .collect();
        for child_id in owned {
            self.remove(&child_id)?;
        }

        for item in &mut self.items {
            let entry = item.entry_mut();
            if entry.parent_id.as_deref() == Some(id) {
                entry.parent_id = None;
            }
        }
        Ok(removed)
    }

    /// Checks id uniqueness and that every `parent_id` resolves.
    pub fn validate_links(&self) -> Result<(), LinkError> {
        let mut ids = HashSet::new();
        for item in &self.items {
            let id = &item.entry().id;
            if !ids.insert(id.as_str()) {
                return Err(LinkError::DuplicateId(id.clone()));
            }
        }
        for item in &self.items {
            let entry = item.entry();
            if let Some(parent_id) = &entry.parent_id {
                if !ids.contains(parent_id.as_str()) {
                    return Err(LinkError::DanglingParent {
                        id: entry.id.clone(),
                        parent_id: parent_id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl<T> From<Vec<T>> for EntryList<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<'a, T> IntoIterator for &'a EntryList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entry::{Entry, EntryFlags};

    fn list() -> EntryList<Entry> {
        EntryList::from(vec![
            Entry::new("COMPOUNDPOWER", "c", "COMPOUNDPOWER").with_flags(EntryFlags::CONTAINER),
            Entry::new("POWER", "c1", "ENERGYBLAST")
                .with_parent("c")
                .with_flags(EntryFlags::OWNED),
            Entry::new("POWER", "c2", "FLIGHT")
                .with_parent("c")
                .with_flags(EntryFlags::OWNED),
            Entry::new("LIST", "l", "GENERIC_OBJECT").with_flags(EntryFlags::GROUP),
            Entry::new("POWER", "l1", "ARMOR").with_parent("l"),
        ])
    }

    #[test]
    fn push_rejects_duplicate_ids() {
        let mut entries = list();
        let err = entries.push(Entry::new("POWER", "l1", "FLASH"));
        assert_eq!(err, Err(LinkError::DuplicateId("l1".into())));
        assert_eq!(entries.len(), 5);
    }

    #[test]
    fn removing_a_compound_deletes_owned_children() {
        let mut entries = list();
        entries.remove("c").expect("compound exists");
        let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["l", "l1"]);
    }

    #[test]
    fn removing_a_list_unparents_children() {
        let mut entries = list();
        entries.remove("l").expect("list exists");
        let armor = entries.get("l1").expect("child survives");
        assert_eq!(armor.parent_id, None);
        assert!(entries.validate_links().is_ok());
    }

    #[test]
    fn removing_unknown_id_fails() {
        let mut entries = list();
        assert_eq!(
            entries.remove("nope").map(|_| ()),
            Err(LinkError::UnknownEntry("nope".into()))
        );
    }

    #[test]
    fn dangling_parent_is_reported() {
        let entries = EntryList::from(vec![Entry::new("POWER", "a", "FLASH").with_parent("ghost")]);
        assert_eq!(
            entries.validate_links(),
            Err(LinkError::DanglingParent {
                id: "a".into(),
                parent_id: "ghost".into()
            })
        );
    }

    #[test]
    fn ancestors_stop_at_cycles() {
        let entries = EntryList::from(vec![
            Entry::new("LIST", "a", "X").with_parent("b").with_flags(EntryFlags::GROUP),
            Entry::new("LIST", "b", "X").with_parent("a").with_flags(EntryFlags::GROUP),
            Entry::new("POWER", "p", "X").with_parent("a"),
        ]);
        assert_eq!(entries.ancestors(2), vec![0, 1]);
    }

    #[test]
    fn top_level_skips_rolled_up_children() {
        let entries = list();
        let ids: Vec<_> = entries.top_level().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["c", "l"]);
    }
}
