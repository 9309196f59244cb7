//! Catalog, pricing and locale reconciliation.
//!
//! Aggregates are rebuilt from scratch on every run; nothing carries over from
//! a previous aggregate snapshot.

use std::collections::BTreeMap;

use tf_itemdb_core::{
    AggregateItem, AggregateSnapshot, CatalogItem, CatalogSnapshot, CrateSeries, ItemAttributes,
    LocaleTable, PricingEntry, PricingKey, PricingSheet, UNCRAFTABLE_QUALITY_KEY,
};

use crate::warpaint::WarpaintIndex;

/// Quality of decorated (warpainted) weapons.
pub const DECORATED_QUALITY: u32 = 15;

/// Counters from one reconciliation run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CompileStats {
    pub seeded: usize,
    pub crates: usize,
    pub series_created: usize,
    pub warpaints_named: usize,
    pub entries_applied: usize,
    /// Pricing keys matching no catalog item.
    pub unresolved_keys: usize,
    /// 8-character keys whose defindex is not a crate.
    pub non_crate_composite_keys: usize,
    /// Quality keys inside applied entries that are not integers.
    pub bad_quality_keys: usize,
}

impl CompileStats {
    pub fn skipped_keys(&self) -> usize {
        self.unresolved_keys + self.non_crate_composite_keys
    }
}

/// Output of [`reconcile`].
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub snapshot: AggregateSnapshot,
    pub stats: CompileStats,
}

/// Build aggregates for every catalog item and fold the pricing sheet into
/// them.
pub fn reconcile(
    catalog: &CatalogSnapshot,
    pricing: &PricingSheet,
    locale: &LocaleTable,
) -> Reconciliation {
    let mut builder = Builder::new(locale);

    for item in &catalog.items {
        builder.seed(item);
    }
    for (key, entry) in &pricing.items {
        builder.apply_pricing(key, entry);
    }

    let Builder { items, stats, .. } = builder;
    log::info!(
        "Reconciled {} items ({} crates, {} series, {} warpaints named); applied {} pricing entries, skipped {}",
        items.len(),
        stats.crates,
        stats.series_created,
        stats.warpaints_named,
        stats.entries_applied,
        stats.skipped_keys()
    );

    Reconciliation {
        snapshot: AggregateSnapshot {
            version: catalog.version,
            pricing_last_modified: pricing.last_modified,
            items,
        },
        stats,
    }
}

struct Builder<'a> {
    locale: &'a LocaleTable,
    warpaints: WarpaintIndex,
    items: BTreeMap<u32, AggregateItem>,
    /// Quality each catalog item declares; the uncraftable marker refers to it.
    declared: BTreeMap<u32, u32>,
    stats: CompileStats,
}

impl<'a> Builder<'a> {
    fn new(locale: &'a LocaleTable) -> Self {
        Self {
            locale,
            warpaints: WarpaintIndex::from_locale(locale),
            items: BTreeMap::new(),
            declared: BTreeMap::new(),
            stats: CompileStats::default(),
        }
    }

    fn seed(&mut self, item: &CatalogItem) {
        let name = self
            .locale
            .token(&item.item_name)
            .unwrap_or(item.name.as_str())
            .to_string();
        let mut aggregate = AggregateItem::new(name, item.defindex, item.item_quality);

        if item.is_crate() {
            let mut series = BTreeMap::new();
            if let Some(id) = item.crate_series() {
                series.insert(id, CrateSeries::new(id));
                self.stats.series_created += 1;
            }
            aggregate.attributes = ItemAttributes::Crate { series };
            self.stats.crates += 1;
        } else if item.is_tool() {
            aggregate.attributes = ItemAttributes::Tool {
                tool_type: item
                    .tool
                    .as_ref()
                    .and_then(|t| t.tool_type.clone())
                    .filter(|t| !t.is_empty()),
                applies_to: Default::default(),
            };
        } else if item.item_quality == DECORATED_QUALITY {
            if let Some(paint) = self.warpaints.lookup(&item.name) {
                log::debug!(
                    "Named warpaint {} ({}) as {}",
                    item.defindex,
                    item.name,
                    paint.name
                );
                aggregate.name = format!("{} {}", paint.name, aggregate.name);
                self.stats.warpaints_named += 1;
            }
        }

        if self.items.insert(item.defindex, aggregate).is_some() {
            log::warn!("Duplicate catalog defindex {}; keeping the later item", item.defindex);
        }
        self.declared.insert(item.defindex, item.item_quality);
        self.stats.seeded += 1;
    }

    fn apply_pricing(&mut self, key: &str, entry: &PricingEntry) {
        let Some(defindex) = self.resolve(key) else {
            return;
        };
        let Some(aggregate) = self.items.get_mut(&defindex) else {
            return;
        };
        let declared = self.declared.get(&defindex).copied();

        for quality in entry.keys() {
            if quality == UNCRAFTABLE_QUALITY_KEY {
                if let Some(declared) = declared {
                    aggregate.uncraftable_qualities.insert(declared);
                }
                continue;
            }
            match quality.parse::<u32>() {
                Ok(q) => {
                    aggregate.qualities.insert(q);
                }
                Err(_) => {
                    log::debug!("Pricing key {key}: ignoring quality {quality:?}");
                    self.stats.bad_quality_keys += 1;
                }
            }
        }
        self.stats.entries_applied += 1;
    }

    /// Find the aggregate a pricing key refers to, creating crate series on
    /// the way.
    fn resolve(&mut self, key: &str) -> Option<u32> {
        match PricingKey::parse(key) {
            PricingKey::Composite { defindex, series } => {
                let Some(crate_series) = self
                    .items
                    .get_mut(&defindex)
                    .and_then(AggregateItem::crate_series_mut)
                else {
                    log::debug!("Pricing key {key}: {defindex} is not a crate; unreconciled");
                    self.stats.non_crate_composite_keys += 1;
                    return None;
                };
                match series {
                    Some(id) => {
                        if !crate_series.contains_key(&id) {
                            crate_series.insert(id, CrateSeries::new(id));
                            self.stats.series_created += 1;
                        }
                    }
                    None => log::debug!("Pricing key {key}: series is not a number"),
                }
                Some(defindex)
            }
            PricingKey::Defindex(defindex) if self.items.contains_key(&defindex) => Some(defindex),
            _ => {
                log::debug!("Pricing key {key}: no matching catalog item");
                self.stats.unresolved_keys += 1;
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/reconcile_tests.rs"]
mod tests;
