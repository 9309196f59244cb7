use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use tf_itemdb_core::Settings;
use tf_itemdb_steam::{SteamClient, UpdateCheck, check_for_update};

use super::run_async;
use crate::error::CliError;

pub(crate) async fn check(settings: &Settings) -> Result<UpdateCheck, CliError> {
    let client = SteamClient::new(settings)?;
    Ok(check_for_update(&client, &settings.store()).await?)
}

pub(crate) fn report_check(check: &UpdateCheck) {
    match *check {
        UpdateCheck::UpToDate { version } => log::info!(
            "{} Schema version {} is up to date",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            version,
        ),
        UpdateCheck::Pending { version } => log::info!(
            "{} Schema version {} is current but an earlier update did not finish",
            "\u{21bb}".if_supports_color(Stdout, |t| t.yellow()),
            version,
        ),
        UpdateCheck::Outdated { previous, required } => log::info!(
            "{} New schema version {} (was {})",
            "\u{2605}".if_supports_color(Stdout, |t| t.yellow()),
            required.if_supports_color(Stdout, |t| t.bold()),
            previous,
        ),
    }
}

/// Compare the stored version marker against Steam.
pub(crate) fn run_check(settings: &Settings) -> Result<(), CliError> {
    let check = run_async(check(settings))?;
    report_check(&check);
    Ok(())
}
