use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::errors::DavError;
use crate::models::{FileStat, FileType, RemoteEntry};
use crate::webdav::config::MountConfig;
use crate::webdav::connection::DavConnection;
use crate::webdav::parser::parse_multistatus;
use crate::webdav::paths;

/// URI scheme the provider is registered under with the host.
pub const SCHEME: &str = "davfs";

/// Host-facing flags on `write_file`. PUT applies whatever creation and
/// overwrite semantics the remote server has; these are carried only because
/// the host's contract passes them.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    pub create: bool,
    pub overwrite: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RenameOptions {
    pub overwrite: bool,
}

#[derive(Debug, Clone, Default)]
pub struct WatchOptions {
    pub recursive: bool,
    pub excludes: Vec<String>,
}

/// Subscription handle returned by `watch`. The provider performs no push
/// notification of remote changes, so the handle never fires; callers
/// re-poll via `stat`/`read_directory`.
#[derive(Debug)]
pub struct WatchHandle {
    _private: (),
}

impl WatchHandle {
    fn inert() -> Self {
        Self { _private: () }
    }
}

/// The filesystem contract the host consumes. Paths are host-visible
/// absolute paths, always `/`-rooted.
#[async_trait]
pub trait FileSystemProvider: Send + Sync {
    async fn stat(&self, path: &str) -> Result<FileStat, DavError>;
    async fn read_directory(&self, path: &str) -> Result<Vec<(String, FileType)>, DavError>;
    async fn read_file(&self, path: &str) -> Result<Vec<u8>, DavError>;
    async fn write_file(
        &self,
        path: &str,
        content: Vec<u8>,
        options: WriteOptions,
    ) -> Result<(), DavError>;
    async fn rename(
        &self,
        old_path: &str,
        new_path: &str,
        options: RenameOptions,
    ) -> Result<(), DavError>;
    async fn delete(&self, path: &str) -> Result<(), DavError>;
    async fn create_directory(&self, path: &str) -> Result<(), DavError>;
    fn watch(&self, path: &str, options: WatchOptions) -> WatchHandle;
}

/// Maps the host filesystem contract 1:1 onto WebDAV verbs. Holds no state
/// between calls beyond the immutable config and the disposed flag, so
/// operations may interleave arbitrarily; every call is a fresh round trip.
#[derive(Debug)]
pub struct DavFileSystem {
    connection: DavConnection,
    disposed: AtomicBool,
}

impl DavFileSystem {
    pub fn new(config: MountConfig) -> Result<Self, DavError> {
        Ok(Self {
            connection: DavConnection::new(config)?,
            disposed: AtomicBool::new(false),
        })
    }

    pub fn config(&self) -> &MountConfig {
        self.connection.config()
    }

    /// Marks the filesystem as disposed. Idempotent; all operations issued
    /// afterwards fail with `Disposed` without touching the network.
    pub fn close(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    fn ensure_open(&self) -> Result<(), DavError> {
        if self.is_closed() {
            Err(DavError::Disposed)
        } else {
            Ok(())
        }
    }

    /// PROPFIND Depth 1 on `path`, parsed but unfiltered: the directory's
    /// own entry is still present. Used by `stat`, `read_directory` and the
    /// mount-time connectivity probe.
    pub(crate) async fn list_entries(&self, path: &str) -> Result<Vec<RemoteEntry>, DavError> {
        self.ensure_open()?;
        let body = self.connection.propfind(path).await?;
        parse_multistatus(&body)
    }
}

#[async_trait]
impl FileSystemProvider for DavFileSystem {
    async fn stat(&self, path: &str) -> Result<FileStat, DavError> {
        let entries = self.list_entries(path).await?;

        let entry = entries.first().ok_or(DavError::NotFound)?;

        Ok(FileStat {
            file_type: if entry.is_directory {
                FileType::Directory
            } else {
                FileType::File
            },
            size: entry.size.unwrap_or(0),
        })
    }

    async fn read_directory(&self, path: &str) -> Result<Vec<(String, FileType)>, DavError> {
        let entries = self.list_entries(path).await?;
        let prefix = &self.config().prefix;

        // Server response order, not re-sorted
        let children = entries
            .into_iter()
            .filter(|entry| !paths::is_self_entry(&entry.href, path, prefix))
            .map(|entry| {
                let file_type = if entry.is_directory {
                    FileType::Directory
                } else {
                    FileType::File
                };
                (paths::child_name(&entry.href), file_type)
            })
            .collect();

        Ok(children)
    }

    async fn read_file(&self, path: &str) -> Result<Vec<u8>, DavError> {
        self.ensure_open()?;
        self.connection.get(path).await
    }

    async fn write_file(
        &self,
        path: &str,
        content: Vec<u8>,
        _options: WriteOptions,
    ) -> Result<(), DavError> {
        self.ensure_open()?;
        self.connection.put(path, content).await
    }

    async fn rename(
        &self,
        old_path: &str,
        new_path: &str,
        _options: RenameOptions,
    ) -> Result<(), DavError> {
        self.ensure_open()?;
        self.connection.mv(old_path, new_path).await
    }

    async fn delete(&self, path: &str) -> Result<(), DavError> {
        self.ensure_open()?;
        self.connection.delete(path).await
    }

    async fn create_directory(&self, path: &str) -> Result<(), DavError> {
        self.ensure_open()?;
        self.connection.mkcol(path).await
    }

    fn watch(&self, _path: &str, _options: WatchOptions) -> WatchHandle {
        WatchHandle::inert()
    }
}
