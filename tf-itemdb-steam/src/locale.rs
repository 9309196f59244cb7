//! Locale resource download.
//!
//! The English token tables are mirrored in SteamDB's GameTracking
//! repository. Both files are fetched concurrently, decoded, and stored as a
//! single [`LocaleTable`].

use tf_itemdb_core::{LocaleTable, Settings, SnapshotStore};

use crate::error::FetchError;

const RAW_BASE_URL: &str = "https://raw.githubusercontent.com";
const LOCALE_FILE: &str = "tf/resource/tf_english.txt";
const LOCALE_PROTO_OBJ_DEFS_FILE: &str = "tf/resource/tf_proto_obj_defs_english.txt";

/// Downloads raw locale text files.
pub struct LocaleSource {
    http: reqwest::Client,
    base_url: String,
}

impl LocaleSource {
    pub fn new(settings: &Settings) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()?;
        let base_url = format!(
            "{RAW_BASE_URL}/{}/refs/heads/{}",
            settings.locale_repository, settings.locale_branch
        );
        Ok(Self { http, base_url })
    }

    pub fn file_url(&self, file: &str) -> String {
        format!("{}/{file}", self.base_url)
    }

    /// Download both token files, returning `(tokens, proto_obj_defs)` text.
    pub async fn download(&self) -> Result<(String, String), FetchError> {
        tokio::try_join!(
            self.download_text(LOCALE_FILE),
            self.download_text(LOCALE_PROTO_OBJ_DEFS_FILE),
        )
    }

    async fn download_text(&self, file: &str) -> Result<String, FetchError> {
        let url = self.file_url(file);
        log::debug!("Downloading {url}");
        let resp = self.http.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                endpoint: url,
            });
        }

        let bytes = resp.bytes().await?;
        Ok(decode_text(&bytes))
    }
}

/// Decode resource file bytes. The game ships these as UTF-16LE with a BOM;
/// mirrors usually convert to UTF-8.
pub fn decode_text(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    String::from_utf8_lossy(bytes).into_owned()
}

/// Download, decode, and persist the locale table.
pub async fn update_locale(
    source: &LocaleSource,
    store: &SnapshotStore,
) -> Result<LocaleTable, FetchError> {
    let (tokens_text, proto_text) = source.download().await?;
    let table = LocaleTable::from_vdf(&tokens_text, &proto_text)?;
    store.save_locale(&table)?;
    log::info!(
        "Saved locale table: {} tokens, {} proto object definition tokens",
        table.tokens.len(),
        table.proto_obj_def_tokens.len()
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        assert_eq!(decode_text(b"\"a\" \"b\""), "\"a\" \"b\"");
    }

    #[test]
    fn test_decode_utf16le_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "\"k\" \"é\"".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_text(&bytes), "\"k\" \"é\"");
    }

    #[test]
    fn test_file_url() {
        let settings = Settings::default();
        let source = LocaleSource::new(&settings).unwrap();
        assert_eq!(
            source.file_url(LOCALE_FILE),
            "https://raw.githubusercontent.com/SteamDatabase/GameTracking-TF2/refs/heads/master/tf/resource/tf_english.txt"
        );
    }
}
