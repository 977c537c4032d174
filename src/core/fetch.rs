use crate::utils::error::{HousingError, Result};
use flate2::read::GzDecoder;
use reqwest::Client;
use std::io::Read;
use std::path::Path;

pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/ageron/handson-ml2/master/datasets/housing/housing.tgz";

pub const ARCHIVE_MEMBER: &str = "housing.csv";

/// 預先配置的上限，tar 標頭的大小欄位不可信
const MAX_PREALLOCATION: u64 = 64 << 20;

pub struct HousingFetcher {
    client: Client,
    url: String,
}

impl HousingFetcher {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// 下載壓縮檔原始位元組
    pub async fn fetch(&self) -> Result<Vec<u8>> {
        tracing::debug!("Requesting dataset from: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        tracing::debug!("Dataset response status: {}", status);
        if !status.is_success() {
            return Err(HousingError::DownloadError {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        tracing::info!("⬇️  Downloaded {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}

/// Gunzips and untars `archive` in memory and returns the bytes of the entry whose
/// file name is `member`, wherever it sits in the archive.
pub fn extract_member(archive: &[u8], member: &str) -> Result<Vec<u8>> {
    let mut tar = tar::Archive::new(GzDecoder::new(archive));

    for entry in tar.entries()? {
        let mut entry = entry?;
        let path = entry.path()?.into_owned();

        if path.file_name() == Some(Path::new(member).as_os_str()) {
            let declared = entry.size();
            let mut data = Vec::with_capacity(declared.min(MAX_PREALLOCATION) as usize);
            entry.read_to_end(&mut data)?;
            if data.len() as u64 != declared {
                return Err(HousingError::ArchiveError {
                    message: format!(
                        "'{}' is truncated: header declares {} bytes, read {}",
                        path.display(),
                        declared,
                        data.len()
                    ),
                });
            }
            tracing::debug!("Extracted {} ({} bytes)", path.display(), data.len());
            return Ok(data);
        }
    }

    Err(HousingError::ArchiveError {
        message: format!("'{}' not found in archive", member),
    })
}
