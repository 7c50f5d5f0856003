//! filex: unified file access over heterogeneous storage backends.
//!
//! One API surface (copy, move, remove, list, read, write, touch, archive,
//! chmod) dispatched to a local filesystem, a distributed-filesystem
//! client, an FTP client, or an HTTP resource, chosen by inspecting the
//! location string (`dfs://…`, `ftp://…`, `file://…`, `http(s)://…`, or a
//! plain path). The interesting parts are the [`location`] classifier, the
//! [`sniff`] content sniffer behind `read`, and the [`hub`] dispatcher;
//! everything past them is a one-line delegation to a backend.
//!
//! ```no_run
//! use filex::{FileHub, ReadOptions};
//!
//! let hub = FileHub::new();
//! let out = hub.read("~/notes/today.txt", &ReadOptions::default())?;
//! println!("{}", out.content);
//! # Ok::<(), filex::FilexError>(())
//! ```

pub mod backend;
pub mod cli;
pub mod config;
pub mod errors;
pub mod hub;
pub mod location;
pub mod output;
pub mod session;
pub mod sniff;

pub use backend::http::{Credentials, HttpFetch};
pub use backend::local::LocalFs;
pub use backend::memory::MemoryFs;
pub use backend::{Backend, Op};
pub use errors::{FilexError, Result};
pub use hub::{BatchFailure, BatchOutcome, FileHub, FileHubBuilder};
pub use location::{Location, Scheme, classify};
pub use session::{Session, SessionScheme};
pub use sniff::{ReadInput, ReadOptions, ReadResult, SourceType, XmlSource};
