use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;

use crate::listing;
use crate::listing::Entry;
use crate::listing::Listing;
use crate::listing::Metadata;
use crate::process::Runner;
use crate::process::SystemRunner;
use crate::Error;
use crate::Options;
use crate::Tool;

/// Handle to a 7-Zip archive on disk.
///
/// Entries and metadata are read lazily with the list command and cached until
/// the archive is modified through this handle. Changes made by anyone else are
/// not noticed while the cache is populated.
///
/// Nothing coordinates concurrent modifications of the same file from several
/// handles or processes; only the tool's own locking (if any) applies.
///
/// Dropping the handle never deletes the file, see [`SevenZipArchive::dispose`].
pub struct SevenZipArchive<R: Runner = SystemRunner> {
    path: PathBuf,
    tool: Tool,
    runner: R,
    delete_on_dispose: bool,
    listing: Option<Listing>,
}

impl SevenZipArchive<SystemRunner> {
    /// Opens the archive at `path`. The file does not have to exist yet.
    pub fn open<P: Into<PathBuf>>(path: P, options: Options) -> Result<Self, Error> {
        let runner = SystemRunner::new().with_timeout(options.timeout);
        Self::with_runner(path, options, runner)
    }
}

impl<R: Runner> SevenZipArchive<R> {
    pub fn with_runner<P: Into<PathBuf>>(
        path: P,
        options: Options,
        runner: R,
    ) -> Result<Self, Error> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(Error::invalid_argument("missing archive path"));
        }
        let tool = Tool::new(&options)?;
        tool.debug(format_args!("Archive file: {}", path.display()));
        Ok(Self {
            path,
            tool,
            runner,
            delete_on_dispose: options.delete_on_dispose,
            listing: None,
        })
    }

    /// Archive file name as passed to [`open`](Self::open).
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn set_debug(&mut self, value: bool) {
        self.tool.set_debug(value);
    }

    /// Entries in the order the tool lists them.
    pub fn entries(&mut self) -> Result<&[Entry], Error> {
        Ok(&self.listing()?.entries)
    }

    /// Metadata from the last listing; empty if the archive does not exist.
    pub fn metadata(&mut self) -> Result<&Metadata, Error> {
        Ok(&self.listing()?.metadata)
    }

    pub fn len(&mut self) -> Result<usize, Error> {
        Ok(self.entries()?.len())
    }

    pub fn is_empty(&mut self) -> Result<bool, Error> {
        Ok(self.entries()?.is_empty())
    }

    pub fn get(&mut self, index: usize) -> Result<Option<&Entry>, Error> {
        Ok(self.entries()?.get(index))
    }

    pub fn iter(&mut self) -> Result<std::slice::Iter<'_, Entry>, Error> {
        Ok(self.entries()?.iter())
    }

    /// Extracts the whole archive, or only `names`, into an existing directory.
    ///
    /// Full paths are preserved. Every name must be present in the listing.
    pub fn extract_to<S: AsRef<str>>(&mut self, destination: &Path, names: &[S]) -> Result<(), Error> {
        if destination.as_os_str().is_empty() {
            return Err(Error::invalid_argument("missing destination argument"));
        }
        if !destination.is_dir() {
            return Err(Error::invalid_argument(format!(
                "destination {:?} not found or not a directory",
                destination
            )));
        }
        if !names.is_empty() {
            let entries = self.entries()?;
            for name in names.iter().map(AsRef::<str>::as_ref) {
                if !entries.iter().any(|entry| entry.name == name) {
                    return Err(Error::EntryNotFound(name.to_string()));
                }
            }
        }
        let mut invocation = self.tool.invocation("x");
        invocation
            .args(["-bd", "-y"])
            .switch("-o", destination)
            .arg("--")
            .arg(&self.path)
            .args(names.iter().map(AsRef::<str>::as_ref));
        let result = self.tool.run(&self.runner, &invocation, None)?;
        if !result.success() {
            return Err(Error::execution(&invocation, result));
        }
        Ok(())
    }

    /// Adds (or replaces) an entry named `name` with the given contents.
    ///
    /// The name may contain directories. The contents are piped to the tool.
    pub fn add_bytes(&mut self, name: &str, contents: &[u8]) -> Result<(), Error> {
        if name.is_empty() {
            return Err(Error::invalid_argument("missing entry name"));
        }
        let mut invocation = self.tool.invocation("a");
        invocation
            .args(["-sae", "-bd", "-y"])
            .switch("-si", name)
            .arg("--")
            .arg(&self.path);
        let result = self.tool.run(&self.runner, &invocation, Some(contents))?;
        if !result.success() {
            return Err(Error::execution(&invocation, result));
        }
        self.invalidate();
        Ok(())
    }

    /// Adds the contents of `dir` (not the directory itself) to the archive.
    ///
    /// One call for many files compresses better than many [`add_bytes`](Self::add_bytes) calls.
    pub fn add_dir(&mut self, dir: &Path) -> Result<(), Error> {
        if dir.as_os_str().is_empty() {
            return Err(Error::invalid_argument("missing directory argument"));
        }
        if !dir.is_dir() {
            return Err(Error::invalid_argument(format!(
                "directory {:?} does not exist",
                dir
            )));
        }
        let mut invocation = self.tool.invocation("a");
        invocation
            .args(["-sae", "-bd", "-y", "--"])
            .arg(&self.path)
            .arg(dir_contents(dir));
        let result = self.tool.run(&self.runner, &invocation, None)?;
        if !result.success() {
            return Err(Error::execution(&invocation, result));
        }
        self.invalidate();
        Ok(())
    }

    /// Tests the integrity of the archive.
    ///
    /// Returns `false` for a missing, corrupt or unreadable archive.
    pub fn test(&self) -> Result<bool, Error> {
        if !self.path.exists() {
            return Ok(false);
        }
        let mut invocation = self.tool.invocation("t");
        invocation.arg("--").arg(&self.path);
        let result = self.tool.run(&self.runner, &invocation, None)?;
        match result.code() {
            Some(0) => Ok(true),
            Some(CORRUPT_ARCHIVE) => Ok(false),
            _ => Err(Error::execution(&invocation, result)),
        }
    }

    /// Releases the handle, deleting the file if
    /// [`delete_on_dispose`](Options::delete_on_dispose) is set.
    pub fn dispose(self) -> Result<(), Error> {
        if !self.delete_on_dispose {
            return Ok(());
        }
        match fs_err::remove_file(&self.path) {
            Ok(()) => {
                self.tool
                    .debug(format_args!("Deleted {}", self.path.display()));
                Ok(())
            }
            Err(ref e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.tool
                    .debug(format_args!("File {} is missing", self.path.display()));
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn listing(&mut self) -> Result<&Listing, Error> {
        if self.listing.is_none() {
            if !self.path.exists() {
                return Ok(&EMPTY_LISTING);
            }
            self.listing = Some(listing::list(&self.runner, &self.tool, &self.path)?);
        }
        Ok(self.listing.as_ref().unwrap_or(&EMPTY_LISTING))
    }

    fn invalidate(&mut self) {
        self.listing = None;
    }
}

/// `dir/.` makes the tool store paths relative to `dir`.
fn dir_contents(dir: &Path) -> OsString {
    let bytes = dir.as_os_str().as_encoded_bytes();
    let mut arg = dir.as_os_str().to_os_string();
    if bytes.ends_with(b"/") {
        arg.push(".");
    } else if !bytes.ends_with(b"/.") {
        arg.push("/.");
    }
    arg
}

static EMPTY_LISTING: Listing = Listing::new();

/// Exit code of `7z t` for an archive that can't be read.
const CORRUPT_ARCHIVE: i32 = 2;
