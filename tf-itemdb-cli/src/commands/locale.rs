use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use tf_itemdb_core::{LocaleTable, Settings};
use tf_itemdb_steam::{LocaleSource, update_locale};

use super::run_async;
use crate::error::CliError;

pub(crate) async fn refresh_locale(settings: &Settings) -> Result<LocaleTable, CliError> {
    let source = LocaleSource::new(settings)?;
    Ok(update_locale(&source, &settings.store()).await?)
}

pub(crate) fn report_locale(table: &LocaleTable) {
    log::info!(
        "{} Locale updated: {} tokens, {} proto object tokens",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        table.tokens.len(),
        table.proto_obj_def_tokens.len(),
    );
}

pub(crate) fn run_update_locale(settings: &Settings) -> Result<(), CliError> {
    let table = run_async(refresh_locale(settings))?;
    report_locale(&table);
    Ok(())
}
