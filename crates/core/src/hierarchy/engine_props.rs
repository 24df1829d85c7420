//! Property-based tests for HierarchyEngine.
//!
//! Random catalogs are driven through random selector event sequences and
//! the cascading invariants are checked after every step.

use std::cmp::Ordering;

use filterbar_shared::types::{ItemId, SelectionMode, Tier, TierModes};
use proptest::prelude::*;

use super::catalog::{CatalogItem, OptionCatalog};
use super::engine::HierarchyEngine;
use super::options::display_order;
use super::state::SelectedItem;

const NAMES: &[&str] = &["Альфа", "бета", "Юг", "north", "North", "Zeta", "ёлка", "Delta"];

/// Builds a catalog where every item has `fan_out` children named from NAMES.
fn build_catalog(fan_out: usize, name_seed: usize) -> OptionCatalog {
    let mut catalog = OptionCatalog::new("root");
    let mut parents = vec![ItemId::new("root")];
    let mut counter = name_seed;

    for tier in Tier::ALL {
        let mut next_parents = Vec::new();
        for parent in &parents {
            let items: Vec<CatalogItem> = (0..fan_out)
                .map(|i| {
                    counter += 1;
                    CatalogItem::new(
                        format!("{}-{parent}-{i}", tier.as_str()),
                        NAMES[counter % NAMES.len()],
                    )
                })
                .collect();
            next_parents.extend(items.iter().map(|item| item.id.clone()));
            catalog = catalog.with_items(tier, parent.clone(), items);
        }
        parents = next_parents;
    }

    catalog
}

#[derive(Debug, Clone)]
enum Op {
    Select(usize, usize),
    Deselect(usize, usize),
    Commit(usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..4, 0usize..16).prop_map(|(t, i)| Op::Select(t, i)),
        (0usize..4, 0usize..16).prop_map(|(t, i)| Op::Deselect(t, i)),
        (0usize..4).prop_map(Op::Commit),
    ]
}

fn arb_mode() -> impl Strategy<Value = SelectionMode> {
    prop_oneof![Just(SelectionMode::Single), Just(SelectionMode::Multiple)]
}

/// Picks the `index`-th currently offered option of `tier`, if any.
fn offered(engine: &HierarchyEngine, tier: Tier, index: usize) -> Option<SelectedItem> {
    let items: Vec<CatalogItem> = engine
        .options_for(tier)
        .into_iter()
        .flat_map(|group| group.items)
        .collect();
    if items.is_empty() {
        return None;
    }
    Some(SelectedItem::from(&items[index % items.len()]))
}

fn apply(engine: &mut HierarchyEngine, op: &Op) {
    match *op {
        Op::Select(t, i) => {
            let tier = Tier::ALL[t];
            if let Some(item) = offered(engine, tier, i) {
                engine.select(tier, &item);
            }
        }
        Op::Deselect(t, i) => {
            let tier = Tier::ALL[t];
            if let Some(item) = offered(engine, tier, i) {
                engine.deselect(tier, &item.id);
            }
        }
        Op::Commit(t) => {
            engine.commit(Tier::ALL[t]);
        }
    }
}

fn assert_consistent(engine: &HierarchyEngine) -> Result<(), TestCaseError> {
    for tier in Tier::ALL.into_iter().skip(1) {
        let parent = tier.parent().unwrap();
        let parent_ids = engine.state().committed_ids(parent);

        if parent_ids.is_empty() {
            prop_assert!(engine.committed(tier).is_empty());
            prop_assert!(engine.options_for(tier).is_empty());
        }

        for group in engine.options_for(tier) {
            let group_parent = group.parent.expect("child groups carry a parent");
            prop_assert!(parent_ids.contains(&group_parent.id));
            let listed = engine.catalog().children(tier, &group_parent.id).unwrap();
            for item in &group.items {
                prop_assert!(listed.contains(item));
            }
        }
    }
    Ok(())
}

fn assert_sorted(names: &[&str]) -> Result<(), TestCaseError> {
    for pair in names.windows(2) {
        prop_assert_ne!(display_order(pair[0], pair[1]), Ordering::Greater);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Options of a child tier only ever come from committed parents, and an
    /// empty parent means no child options and no child selection.
    #[test]
    fn prop_options_follow_committed_parents(
        fan_out in 1usize..4,
        seed in 0usize..8,
        modes in proptest::array::uniform4(arb_mode()),
        ops in proptest::collection::vec(arb_op(), 1..40),
    ) {
        let modes = TierModes {
            subsidiary: modes[0],
            field: modes[1],
            station: modes[2],
            compressor: modes[3],
        };
        let mut engine = HierarchyEngine::new(modes, "root");
        engine.set_options(build_catalog(fan_out, seed));

        for op in &ops {
            apply(&mut engine, op);
            assert_consistent(&engine)?;
        }

        // Clearing the top tier empties everything below it.
        let mut cleared = engine.clone();
        cleared.reset();
        for tier in Tier::ALL.into_iter().skip(1) {
            prop_assert!(cleared.options_for(tier).is_empty());
        }
    }

    /// A new single-mode selection at tier N leaves tiers N+1.. empty.
    #[test]
    fn prop_single_select_clears_descendants(
        fan_out in 2usize..4,
        seed in 0usize..8,
        ops in proptest::collection::vec(arb_op(), 0..30),
        target in 0usize..4,
        pick in 0usize..16,
    ) {
        let mut engine = HierarchyEngine::new(TierModes::uniform(SelectionMode::Single), "root");
        engine.set_options(build_catalog(fan_out, seed));
        for op in &ops {
            apply(&mut engine, op);
        }

        let tier = Tier::ALL[target];
        if let Some(item) = offered(&engine, tier, pick) {
            let is_new = !engine.state().committed_ids(tier).contains(&item.id);
            engine.select(tier, &item);
            if is_new {
                for descendant in tier.descendants() {
                    prop_assert!(engine.committed(*descendant).is_empty());
                }
            }
            prop_assert_eq!(engine.committed(tier), &[item][..]);
        }
    }

    /// Every option list and every group sequence is in display-name order.
    #[test]
    fn prop_options_are_alphabetical(
        fan_out in 1usize..5,
        seed in 0usize..8,
        ops in proptest::collection::vec(arb_op(), 0..30),
    ) {
        let mut engine = HierarchyEngine::new(TierModes::uniform(SelectionMode::Multiple), "root");
        engine.set_options(build_catalog(fan_out, seed));
        for op in &ops {
            apply(&mut engine, op);
        }

        for tier in Tier::ALL {
            let groups = engine.options_for(tier);
            let parents: Vec<&str> = groups
                .iter()
                .filter_map(|group| group.parent.as_ref().map(|p| p.name.as_str()))
                .collect();
            assert_sorted(&parents)?;
            for group in &groups {
                let names: Vec<&str> = group.items.iter().map(|item| item.name.as_str()).collect();
                assert_sorted(&names)?;
            }
        }
    }
}
