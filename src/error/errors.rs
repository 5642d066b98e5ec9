use std::fmt::Display;
use std::fmt::Formatter;

/// Messages collected while scanning a transcript.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Errors(Vec<String>);

impl Errors {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, message: impl ToString) {
        self.0.push(message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Display for Errors {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let mut iter = self.0.iter();
        if let Some(first) = iter.next() {
            f.write_str(first)?;
        }
        for message in iter {
            writeln!(f)?;
            f.write_str(message)?;
        }
        Ok(())
    }
}

impl std::error::Error for Errors {}
