//! Stateful selection engine driven by selector events.

use filterbar_shared::types::{ItemId, SelectionMode, Tier, TierModes};
use tracing::debug;

use super::catalog::OptionCatalog;
use super::options::{self, OptionGroup};
use super::state::{PendingOption, SelectedItem, SelectionState, apply_selection};

/// Hierarchical selection engine.
///
/// Holds the per-tier modes, the latest option catalog and the selection
/// state. Mutating operations return the tiers whose committed selection
/// changed, top to bottom, so the caller knows exactly what to forward to
/// the store.
#[derive(Debug, Clone)]
pub struct HierarchyEngine {
    modes: TierModes,
    catalog: OptionCatalog,
    state: SelectionState,
}

impl HierarchyEngine {
    /// Creates an engine with an empty catalog keyed by `root_key`.
    #[must_use]
    pub fn new(modes: TierModes, root_key: impl Into<ItemId>) -> Self {
        Self {
            modes,
            catalog: OptionCatalog::new(root_key),
            state: SelectionState::default(),
        }
    }

    /// Per-tier selection modes.
    #[must_use]
    pub const fn modes(&self) -> &TierModes {
        &self.modes
    }

    /// Current option catalog.
    #[must_use]
    pub const fn catalog(&self) -> &OptionCatalog {
        &self.catalog
    }

    /// Current selection state.
    #[must_use]
    pub const fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Committed selection of `tier`.
    #[must_use]
    pub fn committed(&self, tier: Tier) -> &[SelectedItem] {
        self.state.committed(tier)
    }

    /// Pending selection of `tier`.
    #[must_use]
    pub fn pending(&self, tier: Tier) -> &[PendingOption] {
        self.state.pending(tier)
    }

    /// Replaces the catalog.
    ///
    /// Committed selections are kept as they are; pending selections are
    /// re-derived so they only show items the new catalog still lists.
    pub fn set_options(&mut self, catalog: OptionCatalog) {
        self.catalog = catalog;
        self.state = options::reconcile_pending(&self.catalog, &self.state);
    }

    /// Returns true if `tier` has a selector and its parent tier has a
    /// committed selection. The top tier only needs a selector.
    #[must_use]
    pub fn is_available(&self, tier: Tier) -> bool {
        if !self.modes.get(tier).is_enabled() {
            return false;
        }
        tier.parent()
            .is_none_or(|parent| self.state.has_selection(parent))
    }

    /// Option groups currently selectable at `tier`.
    #[must_use]
    pub fn options_for(&self, tier: Tier) -> Vec<OptionGroup> {
        options::options_for(&self.catalog, &self.state, tier)
    }

    /// Picks `item` at `tier`.
    ///
    /// In multiple mode the item joins the pending set and nothing is
    /// committed. In single mode `[item]` is committed at once. Items that are
    /// malformed or not among the tier's current options are ignored.
    pub fn select(&mut self, tier: Tier, item: &SelectedItem) -> Vec<Tier> {
        let mode = self.modes.get(tier);
        if !self.is_available(tier) {
            debug!(tier = %tier, mode = %mode, "Ignoring selection on unavailable tier");
            return Vec::new();
        }
        if !item.is_well_formed() {
            debug!(tier = %tier, id = %item.id, "Ignoring malformed selection");
            return Vec::new();
        }
        let Some(option) = options::locate(&self.catalog, &self.state, tier, &item.id) else {
            debug!(tier = %tier, id = %item.id, "Ignoring selection outside current options");
            return Vec::new();
        };

        match mode {
            SelectionMode::Multiple => {
                let pending = self.state.pending_mut(tier);
                if !pending.iter().any(|existing| existing.id == option.id) {
                    pending.push(option);
                }
                Vec::new()
            }
            SelectionMode::Single => self.transition(tier, vec![option]),
            SelectionMode::None => Vec::new(),
        }
    }

    /// Removes `id` from the pending set of a multiple-mode tier.
    ///
    /// Returns true if the pending set changed.
    pub fn deselect(&mut self, tier: Tier, id: &ItemId) -> bool {
        if self.modes.get(tier) != SelectionMode::Multiple {
            return false;
        }
        let pending = self.state.pending_mut(tier);
        let before = pending.len();
        pending.retain(|option| &option.id != id);
        before != pending.len()
    }

    /// Commits the pending set of a multiple-mode tier (selector closed).
    pub fn commit(&mut self, tier: Tier) -> Vec<Tier> {
        if self.modes.get(tier) != SelectionMode::Multiple {
            return Vec::new();
        }
        let items = self.state.pending(tier).to_vec();
        self.transition(tier, items)
    }

    /// Clears every tier. Returns the tiers that had a committed selection.
    pub fn reset(&mut self) -> Vec<Tier> {
        let previous = std::mem::take(&mut self.state);
        self.state.changed_tiers(&previous)
    }

    fn transition(&mut self, tier: Tier, items: Vec<PendingOption>) -> Vec<Tier> {
        let next = apply_selection(&self.state, tier, items);
        let changed = next.changed_tiers(&self.state);
        if changed.len() > 1 {
            debug!(tier = %tier, cleared = changed.len() - 1, "Cascading clear below tier");
        }
        self.state = next;
        changed
    }
}
