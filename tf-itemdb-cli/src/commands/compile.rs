use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use tf_itemdb_compile::CompileReport;
use tf_itemdb_core::Settings;

use super::run_async;
use crate::error::CliError;

pub(crate) async fn compile(settings: &Settings) -> Result<CompileReport, CliError> {
    let store = settings.store();
    Ok(tf_itemdb_compile::compile(&store, &settings.pricing_path()).await?)
}

pub(crate) fn report_compile(report: &CompileReport) {
    let stats = &report.stats;
    log::info!(
        "{} Compiled {} items for version {} -> {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        report.items,
        report.version,
        report.output.display(),
    );
    log::info!(
        "  Crates: {} ({} series), warpaints named: {}",
        stats.crates,
        stats.series_created,
        stats.warpaints_named,
    );
    log::info!(
        "  Pricing entries applied: {}, skipped: {}",
        stats.entries_applied,
        stats.skipped_keys(),
    );
    if stats.skipped_keys() > 0 || stats.bad_quality_keys > 0 {
        log::info!(
            "  {}",
            format!(
                "Unresolved keys: {}, non-crate composite keys: {}, bad quality keys: {}",
                stats.unresolved_keys, stats.non_crate_composite_keys, stats.bad_quality_keys
            )
            .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}

pub(crate) fn run_compile(settings: &Settings) -> Result<(), CliError> {
    let report = run_async(compile(settings))?;
    report_compile(&report);
    Ok(())
}
