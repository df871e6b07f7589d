//! Mounts a remote WebDAV collection as a virtual filesystem for a host
//! editor environment.
//!
//! The core is the translation between the host's filesystem contract
//! (stat / read_directory / read_file / write_file / rename / delete /
//! create_directory) and the WebDAV wire protocol (PROPFIND / GET / PUT /
//! MOVE / DELETE / MKCOL), one idempotent-or-not HTTP verb per operation.
//! Nothing is cached: every call is a fresh round trip to the server.

pub mod errors;
pub mod models;
pub mod webdav;

pub use errors::DavError;
pub use models::{FileStat, FileType, MountSecrets, RemoteEntry};
pub use webdav::config::{Credentials, MountConfig};
pub use webdav::mount::Mount;
pub use webdav::provider::{
    DavFileSystem, FileSystemProvider, RenameOptions, WatchHandle, WatchOptions, WriteOptions,
    SCHEME,
};
