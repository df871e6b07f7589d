use serde::{Deserialize, Serialize};

/// One row of a parsed multistatus response.
///
/// `href` is server-relative exactly as the server sent it: it may or may not
/// carry the configured prefix and a trailing slash. `size` is `None` only for
/// directories; files default to `Some(0)` when the server omits
/// `getcontentlength`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    pub href: String,
    pub is_directory: bool,
    pub size: Option<u64>,
}

/// Entry kind reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileType {
    File,
    Directory,
}

/// Result of a `stat` call, in the shape the host consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStat {
    pub file_type: FileType,
    pub size: u64,
}

/// Raw values handed over by the host's secret storage when a mount is
/// established. All fields are opaque strings to the core; only `webdav_url`
/// is validated (as a syntactic http/https URL) before any request goes out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MountSecrets {
    pub api_key: Option<String>,
    pub access_token: Option<String>,
    pub webdav_url: String,
    pub prefix: Option<String>,
}
