//! Option catalog supplied by the catalog provider.
//!
//! The provider sends, per tier, lists of items keyed by the id of their
//! parent item. Top-tier items are keyed by a fixed root key.

use std::collections::BTreeMap;

use filterbar_shared::types::{ItemId, Tier};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Catalog item as received on the wire. Either field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCatalogItem {
    /// Item uid.
    #[serde(default, alias = "id")]
    pub uid: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
}

impl RawCatalogItem {
    /// Builds a well-formed raw item.
    #[must_use]
    pub fn new(uid: &str, name: &str) -> Self {
        Self {
            uid: Some(uid.to_string()),
            name: Some(name.to_string()),
        }
    }
}

/// Wire catalog: tier → parent uid → items.
pub type RawCatalog = BTreeMap<Tier, BTreeMap<String, Vec<RawCatalogItem>>>;

/// A validated catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Item id.
    pub id: ItemId,
    /// Display name.
    pub name: String,
}

impl CatalogItem {
    /// Creates a catalog item.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Validates a wire item, returning `None` when the uid or name is
    /// missing or blank.
    #[must_use]
    pub fn from_raw(raw: &RawCatalogItem) -> Option<Self> {
        let uid = raw.uid.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let name = raw.name.as_deref().filter(|s| !s.trim().is_empty())?;
        Some(Self::new(uid, name))
    }
}

/// Normalized option catalog. Read-only to the engines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionCatalog {
    root_key: ItemId,
    tiers: [BTreeMap<ItemId, Vec<CatalogItem>>; Tier::COUNT],
}

impl OptionCatalog {
    /// Creates an empty catalog whose top tier lives under `root_key`.
    #[must_use]
    pub fn new(root_key: impl Into<ItemId>) -> Self {
        Self {
            root_key: root_key.into(),
            tiers: Default::default(),
        }
    }

    /// Normalizes a wire catalog, dropping malformed items.
    ///
    /// Parent keys are trimmed like item uids, so groups whose keys differ
    /// only in surrounding whitespace are merged.
    #[must_use]
    pub fn from_raw(raw: &RawCatalog, root_key: impl Into<ItemId>) -> Self {
        let mut catalog = Self::new(root_key);
        let mut dropped = 0usize;

        for (tier, groups) in raw {
            for (parent, items) in groups {
                let valid: Vec<CatalogItem> =
                    items.iter().filter_map(CatalogItem::from_raw).collect();
                dropped += items.len() - valid.len();
                catalog.tiers[tier.index()]
                    .entry(ItemId::new(parent.trim()))
                    .or_default()
                    .extend(valid);
            }
        }

        if dropped > 0 {
            debug!(dropped, "Dropped malformed catalog items");
        }

        catalog
    }

    /// Adds (or replaces) the items listed under `parent` for `tier`.
    #[must_use]
    pub fn with_items(
        mut self,
        tier: Tier,
        parent: impl Into<ItemId>,
        items: Vec<CatalogItem>,
    ) -> Self {
        self.tiers[tier.index()].insert(parent.into(), items);
        self
    }

    /// Key under which top-tier items are listed.
    #[must_use]
    pub const fn root_key(&self) -> &ItemId {
        &self.root_key
    }

    /// Items listed under `parent` for `tier`, if the catalog has that entry.
    #[must_use]
    pub fn children(&self, tier: Tier, parent: &ItemId) -> Option<&[CatalogItem]> {
        self.tiers[tier.index()].get(parent).map(Vec::as_slice)
    }

    /// Top-tier items.
    #[must_use]
    pub fn roots(&self) -> Option<&[CatalogItem]> {
        self.children(Tier::Subsidiary, &self.root_key)
    }

    /// Finds an item by id under `parent`.
    #[must_use]
    pub fn find(&self, tier: Tier, parent: &ItemId, id: &ItemId) -> Option<&CatalogItem> {
        self.children(tier, parent)?.iter().find(|item| &item.id == id)
    }

    /// Returns true if no tier has any entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.iter().all(BTreeMap::is_empty)
    }
}
