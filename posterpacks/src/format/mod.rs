//! Pack storage formats.
//!
//! A poster pack is "a bag of named byte entries". This module hides where
//! those entries live so the rest of the crate can treat a plain directory
//! and a `.zip` archive the same way.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │    FormatResolver   │  probes tried in order, first match wins
//! │  [directory, zip]   │
//! └──────────┬──────────┘
//!            │ Box<dyn PackFormat>
//!            ▼
//! ┌─────────────────────┐
//! │     PackFormat      │ (trait)
//! └──────────┬──────────┘
//!       ┌────┴─────┐
//!       ▼          ▼
//! ┌──────────┐ ┌──────────┐
//! │  Local   │ │   Zip    │
//! │  (dir)   │ │ (archive)│
//! └──────────┘ └──────────┘
//! ```
//!
//! Entry lists are computed lazily and cached until [`PackFormat::reload`].
//!
//! # Example
//!
//! ```ignore
//! use posterpacks::format::FormatResolver;
//!
//! let resolver = FormatResolver::default();
//! if let Some(mut format) = resolver.resolve(Path::new("Packs/Retro.zip")) {
//!     for entry in format.entries()? {
//!         println!("{}", entry.full_name());
//!     }
//! }
//! ```

mod archive;
mod entry;
mod error;
mod local;
mod resolver;
mod traits;

pub use archive::ZipPackFormat;
pub use entry::{EntryLocation, PackFileEntry};
pub use error::{FormatError, FormatResult};
pub use local::LocalPackFormat;
pub use resolver::{directory_probe, zip_probe, FormatProbe, FormatResolver};
pub use traits::{FormatKind, PackFormat};
