mod concurrency;
#[cfg(unix)]
mod file;

pub use self::concurrency::*;
#[cfg(unix)]
pub use self::file::*;
pub use self::runner::*;
pub use self::transcript::*;
