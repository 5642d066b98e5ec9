//! Access to 7-Zip archives through the `7zr`/`7z`/`7za` command-line tool.
//!
//! ```no_run
//! use sevenzip_archive::Options;
//! use sevenzip_archive::SevenZipArchive;
//!
//! let mut archive = SevenZipArchive::open("test.7z", Options::default())?;
//! archive.add_bytes("hello.txt", b"hello\n")?;
//! for entry in archive.entries()? {
//!     println!("{} {}", entry.size, entry.name);
//! }
//! # Ok::<(), sevenzip_archive::Error>(())
//! ```

pub mod archive;
mod error;
pub mod listing;
pub(crate) mod macros;
mod options;
pub mod process;
#[cfg(test)]
pub mod test;
mod tool;

pub use self::archive::*;
pub use self::error::*;
pub use self::listing::Entry;
pub use self::listing::Listing;
pub use self::listing::MetaField;
pub use self::listing::Metadata;
pub use self::options::*;
pub use self::tool::*;
