//! Option derivation for each tier.
//!
//! A tier's options are grouped by the committed items of the tier above it.
//! Groups and the items inside them are ordered by display name,
//! case-insensitively.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use filterbar_shared::types::{ItemId, Tier};
use serde::{Deserialize, Serialize};

use super::catalog::{CatalogItem, OptionCatalog};
use super::state::{PendingOption, SelectedItem, SelectionState};

/// Options of one tier listed under one parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionGroup {
    /// Parent the items belong to; `None` for the top tier.
    pub parent: Option<SelectedItem>,
    /// Selectable items, ordered by display name.
    pub items: Vec<CatalogItem>,
}

/// Case-insensitive display-name ordering; ties fall back to the raw name.
#[must_use]
pub fn display_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn sorted_items(items: &[CatalogItem]) -> Vec<CatalogItem> {
    let mut items = items.to_vec();
    items.sort_by(|a, b| {
        display_order(&a.name, &b.name).then_with(|| a.id.cmp(&b.id))
    });
    items
}

/// Derives the option groups of `tier` from the committed state.
///
/// Parents without a catalog entry are skipped silently.
#[must_use]
pub fn options_for(
    catalog: &OptionCatalog,
    state: &SelectionState,
    tier: Tier,
) -> Vec<OptionGroup> {
    let Some(parent_tier) = tier.parent() else {
        return catalog
            .roots()
            .map(|roots| {
                vec![OptionGroup {
                    parent: None,
                    items: sorted_items(roots),
                }]
            })
            .unwrap_or_default();
    };

    let mut parents = state.committed(parent_tier).to_vec();
    parents.sort_by(|a, b| {
        display_order(&a.name, &b.name).then_with(|| a.id.cmp(&b.id))
    });

    parents
        .into_iter()
        .filter_map(|parent| {
            let items = catalog.children(tier, &parent.id)?;
            Some(OptionGroup {
                items: sorted_items(items),
                parent: Some(parent),
            })
        })
        .collect()
}

/// Keys under which `tier`'s options are listed in the current state.
fn parent_keys<'a>(
    catalog: &'a OptionCatalog,
    state: &'a SelectionState,
    tier: Tier,
) -> Vec<&'a ItemId> {
    match tier.parent() {
        None => vec![catalog.root_key()],
        Some(parent) => state.committed(parent).iter().map(|item| &item.id).collect(),
    }
}

/// Finds `id` among the current options of `tier`.
#[must_use]
pub fn locate(
    catalog: &OptionCatalog,
    state: &SelectionState,
    tier: Tier,
    id: &ItemId,
) -> Option<PendingOption> {
    parent_keys(catalog, state, tier)
        .into_iter()
        .find_map(|parent| {
            catalog
                .find(tier, parent, id)
                .map(|item| PendingOption::new(item, parent))
        })
}

/// Re-derives every tier's pending selection from its committed selection.
///
/// An item stays visible only while the catalog still lists it under the
/// root key (top tier) or under one of the parent tier's reconciled pending
/// items; its display name is refreshed from the catalog. Committed
/// selections are left as they are.
#[must_use]
pub fn reconcile_pending(catalog: &OptionCatalog, state: &SelectionState) -> SelectionState {
    let mut pending: [Vec<PendingOption>; Tier::COUNT] = Default::default();

    for tier in Tier::ALL {
        let parents: Vec<ItemId> = match tier.parent() {
            None => vec![catalog.root_key().clone()],
            Some(parent) => pending[parent.index()]
                .iter()
                .map(|option| option.id.clone())
                .collect(),
        };

        let mut seen = BTreeSet::new();
        let reconciled: Vec<PendingOption> = state
            .committed(tier)
            .iter()
            .flat_map(|selected| {
                parents.iter().filter_map(move |parent| {
                    catalog
                        .find(tier, parent, &selected.id)
                        .map(|item| PendingOption::new(item, parent))
                })
            })
            .filter(|option| seen.insert(option.id.clone()))
            .collect();

        pending[tier.index()] = reconciled;
    }

    let mut next = state.clone();
    next.replace_pending(pending);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::state::apply_selection;

    fn catalog() -> OptionCatalog {
        OptionCatalog::new("root")
            .with_items(
                Tier::Subsidiary,
                "root",
                vec![
                    CatalogItem::new("s3", "Юг"),
                    CatalogItem::new("s1", "Альфа"),
                    CatalogItem::new("s2", "Бета"),
                ],
            )
            .with_items(
                Tier::Field,
                "s1",
                vec![
                    CatalogItem::new("f2", "zeta"),
                    CatalogItem::new("f1", "Alpha"),
                ],
            )
            .with_items(Tier::Field, "s2", vec![CatalogItem::new("f3", "Gamma")])
    }

    fn committed(tier: Tier, items: &[(&str, &str, &str)]) -> SelectionState {
        let options = items
            .iter()
            .map(|(id, name, parent)| {
                PendingOption::new(&CatalogItem::new(*id, *name), &ItemId::new(*parent))
            })
            .collect();
        apply_selection(&SelectionState::default(), tier, options)
    }

    fn names(group: &OptionGroup) -> Vec<&str> {
        group.items.iter().map(|item| item.name.as_str()).collect()
    }

    #[test]
    fn test_root_options_sorted_alphabetically() {
        let groups = options_for(&catalog(), &SelectionState::default(), Tier::Subsidiary);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].parent.is_none());
        assert_eq!(names(&groups[0]), vec!["Альфа", "Бета", "Юг"]);
    }

    #[test]
    fn test_child_options_grouped_by_parent_name() {
        let state = committed(
            Tier::Subsidiary,
            &[("s2", "Бета", "root"), ("s1", "Альфа", "root")],
        );
        let groups = options_for(&catalog(), &state, Tier::Field);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].parent.as_ref().unwrap().name, "Альфа");
        assert_eq!(names(&groups[0]), vec!["Alpha", "zeta"]);
        assert_eq!(groups[1].parent.as_ref().unwrap().name, "Бета");
        assert_eq!(names(&groups[1]), vec!["Gamma"]);
    }

    #[test]
    fn test_parent_without_entry_is_skipped() {
        let state = committed(Tier::Subsidiary, &[("s3", "Юг", "root")]);
        assert!(options_for(&catalog(), &state, Tier::Field).is_empty());
    }

    #[test]
    fn test_no_parent_selection_means_no_options() {
        assert!(options_for(&catalog(), &SelectionState::default(), Tier::Field).is_empty());
        assert!(
            options_for(
                &OptionCatalog::new("root"),
                &SelectionState::default(),
                Tier::Subsidiary
            )
            .is_empty()
        );
    }

    #[test]
    fn test_display_order_ignores_case() {
        assert_eq!(display_order("alpha", "Beta"), Ordering::Less);
        assert_eq!(display_order("юг", "Альфа"), Ordering::Greater);
        assert_eq!(display_order("Same", "same"), Ordering::Less);
    }

    #[test]
    fn test_locate_only_finds_reachable_items() {
        let state = committed(Tier::Subsidiary, &[("s1", "Альфа", "root")]);
        let found = locate(&catalog(), &state, Tier::Field, &ItemId::new("f1")).unwrap();
        assert_eq!(found.parent_id, ItemId::new("s1"));
        assert!(locate(&catalog(), &state, Tier::Field, &ItemId::new("f3")).is_none());
    }

    #[test]
    fn test_reconcile_refreshes_names_and_hides_unlisted() {
        let state = committed(
            Tier::Subsidiary,
            &[("s1", "Old name", "root"), ("gone", "Removed", "root")],
        );
        let reconciled = reconcile_pending(&catalog(), &state);

        let pending = reconciled.pending(Tier::Subsidiary);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].name, "Альфа");
        assert_eq!(reconciled.committed(Tier::Subsidiary), state.committed(Tier::Subsidiary));
    }
}
