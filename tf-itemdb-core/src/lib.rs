//! Data model, configuration, and snapshot persistence for tf-itemdb.
//!
//! Every artifact the pipeline produces is a flat JSON snapshot under the
//! configured data directory, replaced wholesale on each write. Nothing here
//! touches the network; transports live in `tf-itemdb-steam`.

pub mod aggregate;
pub mod catalog;
pub mod error;
pub mod locale;
pub mod pricing;
pub mod settings;
pub mod store;

pub use aggregate::{
    AggregateItem, AggregateSnapshot, CrateContent, CrateSeries, ItemAttributes, RecipeOutput,
};
pub use catalog::{CatalogItem, CatalogSnapshot, ItemAttribute, ItemCapabilities, ItemStyle, ItemTool};
pub use error::StoreError;
pub use locale::LocaleTable;
pub use pricing::{
    PriceObservation, PriceRange, PriceUnits, PricingEntry, PricingKey, PricingSheet,
    UNCRAFTABLE_QUALITY_KEY,
};
pub use settings::{Settings, config_path};
pub use store::{SnapshotStore, VersionMarker, write_atomic};
