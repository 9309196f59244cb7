//! Upstream transports and the resumable catalog fetch.
//!
//! - [`SteamClient`] talks to the Steam Web API (`GetSchemaItems`,
//!   `UpToDateCheck`).
//! - [`ResumableFetcher`] pages through any [`PageSource`], checkpointing a
//!   partial catalog snapshot when a page fails.
//! - [`locale`] downloads and decodes the game's resource files.

pub mod client;
pub mod error;
pub mod fetcher;
pub mod locale;
pub mod types;
pub mod version;

pub use client::SteamClient;
pub use error::FetchError;
pub use fetcher::{CatalogPage, FetchOutcome, PageSource, ResumableFetcher};
pub use locale::{LocaleSource, update_locale};
pub use version::{UpdateCheck, VersionSource, check_for_update};
