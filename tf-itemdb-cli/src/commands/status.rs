use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use tf_itemdb_core::Settings;

use crate::error::CliError;

/// Print what is currently stored under the data directory.
pub(crate) fn run_status(settings: &Settings) -> Result<(), CliError> {
    let store = settings.store();
    let missing = "missing";

    println!(
        "{}",
        "Data directory:".if_supports_color(Stdout, |t| t.bold())
    );
    println!("  {}", store.root().display());
    println!();

    match store.load_version() {
        Some(marker) => println!("  Version marker:  {}", marker.version),
        None => println!(
            "  Version marker:  {}",
            missing.if_supports_color(Stdout, |t| t.dimmed())
        ),
    }

    match store.load_catalog() {
        Some(catalog) => match catalog.cursor {
            None => println!(
                "  Catalog:         version {}, {} items, {}",
                catalog.version,
                catalog.items.len(),
                "complete".if_supports_color(Stdout, |t| t.green()),
            ),
            Some(cursor) => println!(
                "  Catalog:         version {}, {} items, {} (resume at {})",
                catalog.version,
                catalog.items.len(),
                "partial".if_supports_color(Stdout, |t| t.yellow()),
                cursor,
            ),
        },
        None => println!(
            "  Catalog:         {}",
            missing.if_supports_color(Stdout, |t| t.dimmed())
        ),
    }

    match store.load_locale() {
        Ok(table) => println!(
            "  Locale:          {} tokens, {} proto object tokens",
            table.tokens.len(),
            table.proto_obj_def_tokens.len()
        ),
        Err(e) => println!(
            "  Locale:          {}",
            e.to_string().if_supports_color(Stdout, |t| t.dimmed())
        ),
    }

    let pricing_path = settings.pricing_path();
    println!(
        "  Pricing:         {}{}",
        pricing_path.display(),
        if pricing_path.exists() { "" } else { " (missing)" },
    );

    match store.load_aggregates() {
        Some(aggregates) => println!(
            "  Aggregates:      version {}, {} items",
            aggregates.version,
            aggregates.items.len()
        ),
        None => println!(
            "  Aggregates:      {}",
            missing.if_supports_color(Stdout, |t| t.dimmed())
        ),
    }

    Ok(())
}
