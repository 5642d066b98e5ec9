use std::io::ErrorKind;
use std::path::Path;

use sevenzip_archive::Options;

use crate::Error;

/// Reads archive options from a TOML file; a missing file means defaults.
pub fn read_options(path: &Path) -> Result<Options, Error> {
    match fs_err::read_to_string(path) {
        Ok(s) => Ok(toml::from_str(&s)?),
        Err(ref e) if e.kind() == ErrorKind::NotFound => Ok(Default::default()),
        Err(e) => Err(e.into()),
    }
}
