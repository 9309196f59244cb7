use tf_itemdb_core::Settings;

use super::{check, compile, fetch, locale, run_async};
use crate::error::CliError;

/// Run every pipeline stage in order, stopping after the version check when
/// nothing changed. Each stage is safe to re-run, and the check reports
/// snapshots left behind by a failed run, so a failed update can simply be
/// repeated.
pub(crate) fn run_update(settings: &Settings, force: bool) -> Result<(), CliError> {
    run_async(async {
        let check = check::check(settings).await?;
        check::report_check(&check);
        if !check.needs_update() {
            if !force {
                return Ok(());
            }
            log::info!("Forcing update");
        }

        let version = check.target_version();
        let outcome = fetch::fetch_items(settings, Some(version)).await?;
        fetch::report_fetch(&outcome);

        let table = locale::refresh_locale(settings).await?;
        locale::report_locale(&table);

        let report = compile::compile(settings).await?;
        compile::report_compile(&report);
        Ok(())
    })
}
