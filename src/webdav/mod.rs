// WebDAV filesystem modules organized by concern

pub mod config;
pub mod connection;
pub mod mount;
pub mod parser;
pub mod paths;
pub mod provider;

// Re-export main types for convenience
pub use config::{Credentials, MountConfig};
pub use connection::DavConnection;
pub use mount::Mount;
pub use parser::parse_multistatus;
pub use provider::{
    DavFileSystem, FileSystemProvider, RenameOptions, WatchHandle, WatchOptions, WriteOptions,
    SCHEME,
};
