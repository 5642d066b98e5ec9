use std::str::FromStr;

use log::warn;

use crate::listing::Entry;
use crate::listing::FieldWidths;
use crate::listing::MetaField;
use crate::listing::Metadata;
use crate::Error;
use crate::Errors;

/// Parsed output of the list command.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Listing {
    pub metadata: Metadata,
    pub entries: Vec<Entry>,
}

impl Listing {
    pub const fn new() -> Self {
        Self {
            metadata: Metadata::new(),
            entries: Vec::new(),
        }
    }

    /// Scans the transcript line by line.
    ///
    /// ```text
    /// --
    /// Path = test.7z
    /// Type = 7z
    /// ...
    ///    Date      Time    Attr         Size   Compressed  Name
    /// ------------------- ----- ------------ ------------  ------------------------
    /// 2014-06-06 00:08:39 ....A      3301358       152684  file.csv
    /// ------------------- ----- ------------ ------------  ------------------------
    /// ```
    ///
    /// `Error:` lines before the metadata block fail the whole parse, after all
    /// of them have been collected.
    pub fn parse_lines<I, S>(lines: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = ParserState::PreMeta;
        let mut listing = Listing::new();
        let mut errors = Errors::new();
        for line in lines {
            state = state.advance(line.as_ref(), &mut listing, &mut errors);
            if let ParserState::Done = state {
                break;
            }
        }
        if !errors.is_empty() {
            return Err(Error::Listing(errors));
        }
        Ok(listing)
    }
}

impl FromStr for Listing {
    type Err = Error;
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse_lines(value.lines())
    }
}

enum ParserState {
    PreMeta,
    Meta,
    Entries(FieldWidths),
    Done,
}

impl ParserState {
    fn advance(self, line: &str, listing: &mut Listing, errors: &mut Errors) -> Self {
        match self {
            ParserState::PreMeta => {
                if line == "--" {
                    return ParserState::Meta;
                }
                if let Some(message) = error_message(line) {
                    errors.push(message);
                }
                ParserState::PreMeta
            }
            ParserState::Meta => {
                if let Some((field, value)) = meta_field(line) {
                    listing.metadata.insert(field, value.to_string());
                    return ParserState::Meta;
                }
                if let Some(message) = error_message(line) {
                    warn!("Ignoring error reported after the listing header: {message}");
                    return ParserState::Meta;
                }
                match FieldWidths::from_separator(line) {
                    Some(widths) => ParserState::Entries(widths),
                    None => ParserState::Meta,
                }
            }
            ParserState::Entries(widths) => {
                if line.starts_with('-') {
                    return ParserState::Done;
                }
                listing.entries.push(widths.slice(line));
                ParserState::Entries(widths)
            }
            ParserState::Done => ParserState::Done,
        }
    }
}

fn error_message(line: &str) -> Option<&str> {
    let message = line.strip_prefix("Error:")?.trim_start();
    (!message.is_empty()).then_some(message)
}

fn meta_field(line: &str) -> Option<(MetaField, &str)> {
    let (name, value) = line.split_once(" = ")?;
    Some((name.parse().ok()?, value))
}
