use std::fs;
use std::path::Path;

use tf_itemdb_steam::locale::decode_text;

use crate::error::CliError;

/// Decode a KeyValues file (UTF-8 or UTF-16LE) and print it as JSON.
pub(crate) fn run_decode(file: &Path) -> Result<(), CliError> {
    let bytes = fs::read(file)?;
    let node = tf_itemdb_vdf::decode(&decode_text(&bytes))?;
    println!("{}", serde_json::to_string_pretty(&node)?);
    Ok(())
}
