use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use tf_itemdb_core::Settings;
use tf_itemdb_steam::{FetchOutcome, ResumableFetcher, SteamClient};

use super::run_async;
use crate::error::CliError;

/// Fetch the catalog for `version`, or for the stored version marker.
pub(crate) async fn fetch_items(
    settings: &Settings,
    version: Option<u64>,
) -> Result<FetchOutcome, CliError> {
    let store = settings.store();
    let version = match version {
        Some(v) => v,
        None => store.load_version().map(|m| m.version).ok_or_else(|| {
            CliError::other(
                "No schema version recorded. Run 'tf-itemdb check' first or pass --version",
            )
        })?,
    };

    log::info!("Fetching item schema version {}", version);
    let client = SteamClient::new(settings)?;
    let fetcher = ResumableFetcher::new(client, store, settings.page_delay);
    Ok(fetcher.run(version).await?)
}

pub(crate) fn report_fetch(outcome: &FetchOutcome) {
    let mark = "\u{2714}".if_supports_color(Stdout, |t| t.green());
    match *outcome {
        FetchOutcome::AlreadyComplete { items } => {
            log::info!("{} Catalog already complete ({} items)", mark, items);
        }
        FetchOutcome::Completed {
            items,
            pages,
            resumed_from: 0,
        } => {
            log::info!("{} Fetched {} items in {} pages", mark, items, pages);
        }
        FetchOutcome::Completed {
            items,
            pages,
            resumed_from,
        } => {
            log::info!(
                "{} Fetched {} items in {} pages (resumed at {})",
                mark,
                items,
                pages,
                resumed_from
            );
        }
    }
}

pub(crate) fn run_fetch_items(settings: &Settings, version: Option<u64>) -> Result<(), CliError> {
    let outcome = run_async(fetch_items(settings, version))?;
    report_fetch(&outcome);
    Ok(())
}
