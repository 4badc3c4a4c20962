//! License resolution against the installed dependency tree.
//!
//! - [`fs`]: the [`PackageFs`](fs::PackageFs) seam over directory listing and
//!   file reads, with the tokio-backed [`LocalFs`](fs::LocalFs).
//! - [`resolver`]: override table, license-file discovery and the
//!   `package.json` fallback, plus the bounded-concurrency fan-out.

pub mod fs;
pub mod resolver;

pub use fs::LocalFs;
pub use resolver::Resolver;
