use std::ffi::OsStr;
use std::ffi::OsString;
use std::fmt::Display;
use std::fmt::Formatter;
use std::path::Path;
use std::process::Command;

/// Program plus its arguments.
///
/// Arguments are handed to the operating system one by one and never go
/// through a shell. The [`Display`] implementation renders a shell-quoted
/// command line that is only meant for logs and error messages.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Invocation {
    program: OsString,
    args: Vec<OsString>,
}

impl Invocation {
    pub fn new<P: AsRef<OsStr>>(program: P) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
        }
    }

    pub fn arg<A: AsRef<OsStr>>(&mut self, arg: A) -> &mut Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, A>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = A>,
        A: AsRef<OsStr>,
    {
        for arg in args {
            self.arg(arg);
        }
        self
    }

    /// Appends a switch whose value is glued to it, e.g. `-o<dir>`.
    pub fn switch<V: AsRef<OsStr>>(&mut self, switch: &str, value: V) -> &mut Self {
        let mut arg = OsString::from(switch);
        arg.push(value.as_ref());
        self.args.push(arg);
        self
    }

    pub fn program(&self) -> &Path {
        Path::new(&self.program)
    }

    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

impl Display for Invocation {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(&quote(&self.program))?;
        for arg in self.args.iter() {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

/// Quotes the argument the way a POSIX shell expects it.
///
/// Words made of safe characters are left alone, everything else is wrapped in
/// single quotes with embedded quotes written as `'\''`.
pub fn quote(arg: &OsStr) -> String {
    let arg = arg.to_string_lossy();
    if !arg.is_empty() && arg.chars().all(is_safe_char) {
        return arg.into_owned();
    }
    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('\'');
    for ch in arg.chars() {
        if ch == '\'' {
            quoted.push_str("'\\''");
        } else {
            quoted.push(ch);
        }
    }
    quoted.push('\'');
    quoted
}

fn is_safe_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || "-_./=:@%+,".contains(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_leaves_plain_words_alone() {
        assert_eq!("7zr", quote(OsStr::new("7zr")));
        assert_eq!("-bd", quote(OsStr::new("-bd")));
        assert_eq!("/tmp/test.7z", quote(OsStr::new("/tmp/test.7z")));
    }

    #[test]
    fn quote_wraps_metacharacters() {
        assert_eq!("''", quote(OsStr::new("")));
        assert_eq!("'a b'", quote(OsStr::new("a b")));
        assert_eq!("'$(rm -rf /)'", quote(OsStr::new("$(rm -rf /)")));
        assert_eq!("'it'\\''s'", quote(OsStr::new("it's")));
        assert_eq!(
            "'-siThe €U/sucks/file.txt'",
            quote(OsStr::new("-siThe €U/sucks/file.txt"))
        );
    }

    #[test]
    fn display_renders_command_line() {
        let mut invocation = Invocation::new("7zr");
        invocation
            .arg("x")
            .args(["-bd", "-y"])
            .switch("-o", "my dir")
            .arg("test.7z");
        assert_eq!("7zr x -bd -y '-omy dir' test.7z", invocation.to_string());
        assert_eq!(Path::new("7zr"), invocation.program());
        assert_eq!(5, invocation.get_args().len());
    }
}
