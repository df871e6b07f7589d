use std::sync::Arc;

use tracing::{error, info};

use crate::errors::DavError;
use crate::models::MountSecrets;
use crate::webdav::config::MountConfig;
use crate::webdav::provider::DavFileSystem;

/// A live connection to a remote WebDAV collection, ready to be handed to
/// the host's filesystem registry.
///
/// Connecting probes the collection root before anything is registered, so a
/// bad URL or bad credentials fail the mount up front with nothing left
/// behind. Disposal is idempotent and stops all further requests; dropping
/// the mount disposes it as well.
#[derive(Debug)]
pub struct Mount {
    provider: Arc<DavFileSystem>,
}

impl Mount {
    /// Establishes a mount: builds the adapter and validates connectivity
    /// with a PROPFIND on the collection root. On probe failure the adapter
    /// is closed and the error propagates unchanged.
    pub async fn connect(config: MountConfig) -> Result<Self, DavError> {
        let provider = DavFileSystem::new(config)?;

        match provider.list_entries("/").await {
            Ok(entries) => {
                info!(
                    "🔗 Mounted WebDAV collection at {} ({} root entries)",
                    provider.config().base_url,
                    entries.len()
                );
                Ok(Self {
                    provider: Arc::new(provider),
                })
            }
            Err(e) => {
                error!("❌ WebDAV mount probe failed: {}", e);
                provider.close();
                Err(e)
            }
        }
    }

    /// Connects from the payload the host's secret storage supplies,
    /// validating the URL and selecting the credential mode first.
    pub async fn connect_with_secrets(secrets: &MountSecrets) -> Result<Self, DavError> {
        let config = MountConfig::from_secrets(secrets)?;
        Self::connect(config).await
    }

    /// The filesystem to register with the host under [`SCHEME`].
    ///
    /// [`SCHEME`]: crate::webdav::provider::SCHEME
    pub fn provider(&self) -> Arc<DavFileSystem> {
        Arc::clone(&self.provider)
    }

    /// Tears the mount down. Idempotent; any operation issued through the
    /// provider afterwards fails with `Disposed` without a request going out.
    pub fn dispose(&self) {
        self.provider.close();
    }

    pub fn is_disposed(&self) -> bool {
        self.provider.is_closed()
    }
}

impl Drop for Mount {
    fn drop(&mut self) {
        self.provider.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_debug<T: std::fmt::Debug>() {}

    // Result combinators like unwrap_err need the Ok side to be Debug,
    // so callers can assert on failed mounts
    #[test]
    fn test_mount_types_implement_debug() {
        assert_debug::<Mount>();
        assert_debug::<DavFileSystem>();
    }
}
