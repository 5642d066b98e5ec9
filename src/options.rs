use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

/// Settings of an archive handle.
///
/// Can be read from a configuration file; unknown keys are rejected.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Options {
    /// Log every command, its exit status and, on failure, its output.
    pub debug: bool,
    /// Path or name of the executable. Searched in `PATH` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary: Option<PathBuf>,
    /// Console charset of the tool, e.g. `UTF-8`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_encoding: Option<String>,
    /// Delete the archive file when the handle is disposed of.
    pub delete_on_dispose: bool,
    /// Kill the tool if it runs longer than this.
    #[serde(
        with = "seconds",
        rename = "timeout_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub timeout: Option<Duration>,
}

mod seconds {
    use std::time::Duration;

    use serde::de::Error;
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(duration) => s.serialize_some(&duration.as_secs_f64()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Option::<f64>::deserialize(d)?
            .map(|secs| Duration::try_from_secs_f64(secs).map_err(D::Error::custom))
            .transpose()
    }
}
