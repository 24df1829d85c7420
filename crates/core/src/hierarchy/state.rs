//! Selection state and its transition function.
//!
//! A tier's committed selection is only meaningful while the tier above it has
//! one. [`apply_selection`] produces the whole next state in one step,
//! including every descendant reset, so no intermediate inconsistent state is
//! ever observable.

use std::collections::BTreeSet;

use filterbar_shared::types::{ItemId, Tier};
use serde::{Deserialize, Serialize};

use super::catalog::CatalogItem;

/// A committed, store-visible selection entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectedItem {
    /// Item id.
    pub id: ItemId,
    /// Display name.
    pub name: String,
}

impl SelectedItem {
    /// Creates a selected item.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Returns true when both id and name are present.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.id.is_blank() && !self.name.trim().is_empty()
    }
}

impl From<&CatalogItem> for SelectedItem {
    fn from(item: &CatalogItem) -> Self {
        Self::new(item.id.clone(), item.name.clone())
    }
}

/// Transient UI-level selection, remembered with the parent it was picked under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingOption {
    /// Item id.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Id of the parent item (the catalog root key for the top tier).
    pub parent_id: ItemId,
}

impl PendingOption {
    /// Creates a pending option for `item` found under `parent_id`.
    #[must_use]
    pub fn new(item: &CatalogItem, parent_id: &ItemId) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            parent_id: parent_id.clone(),
        }
    }

    /// Converts to the committed form.
    #[must_use]
    pub fn to_selected(&self) -> SelectedItem {
        SelectedItem::new(self.id.clone(), self.name.clone())
    }
}

/// Committed and pending selections of all four tiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    committed: [Vec<SelectedItem>; Tier::COUNT],
    pending: [Vec<PendingOption>; Tier::COUNT],
}

impl SelectionState {
    /// Committed selection of `tier`.
    #[must_use]
    pub fn committed(&self, tier: Tier) -> &[SelectedItem] {
        &self.committed[tier.index()]
    }

    /// Pending (UI) selection of `tier`.
    #[must_use]
    pub fn pending(&self, tier: Tier) -> &[PendingOption] {
        &self.pending[tier.index()]
    }

    /// Returns true if `tier` has at least one committed item.
    #[must_use]
    pub fn has_selection(&self, tier: Tier) -> bool {
        !self.committed[tier.index()].is_empty()
    }

    /// Ids committed at `tier`.
    #[must_use]
    pub fn committed_ids(&self, tier: Tier) -> BTreeSet<&ItemId> {
        self.committed[tier.index()].iter().map(|item| &item.id).collect()
    }

    /// Tiers whose committed selection differs from `previous`, top to bottom.
    #[must_use]
    pub fn changed_tiers(&self, previous: &Self) -> Vec<Tier> {
        Tier::ALL
            .into_iter()
            .filter(|tier| self.committed(*tier) != previous.committed(*tier))
            .collect()
    }

    pub(crate) fn pending_mut(&mut self, tier: Tier) -> &mut Vec<PendingOption> {
        &mut self.pending[tier.index()]
    }

    pub(crate) fn replace_pending(&mut self, pending: [Vec<PendingOption>; Tier::COUNT]) {
        self.pending = pending;
    }
}

/// Commits `items` at `tier` and returns the resulting state.
///
/// Malformed items are dropped and duplicates collapse to their first
/// occurrence. If the committed membership of `tier` changes, every
/// descendant tier is cleared (committed and pending) in the same step.
/// Re-committing the same membership leaves descendants untouched.
#[must_use]
pub fn apply_selection(
    state: &SelectionState,
    tier: Tier,
    items: Vec<PendingOption>,
) -> SelectionState {
    let mut seen = BTreeSet::new();
    let items: Vec<PendingOption> = items
        .into_iter()
        .filter(|item| item.to_selected().is_well_formed())
        .filter(|item| seen.insert(item.id.clone()))
        .collect();

    let committed: Vec<SelectedItem> = items.iter().map(PendingOption::to_selected).collect();
    let new_ids: BTreeSet<&ItemId> = committed.iter().map(|item| &item.id).collect();
    let membership_changed = new_ids != state.committed_ids(tier);

    let mut next = state.clone();
    next.committed[tier.index()] = committed;
    next.pending[tier.index()] = items;

    if membership_changed {
        for descendant in tier.descendants() {
            next.committed[descendant.index()].clear();
            next.pending[descendant.index()].clear();
        }
    }

    next
}
