// twain-diff: unified diff parsing and side-by-side alignment.

pub mod align;
pub mod error;
pub mod lines;
pub mod oracle;
pub mod unified;

pub use align::Aligner;
pub use error::{Error, Result};
pub use lines::read_lines;
pub use oracle::DiffOracle;
pub use unified::DiffComputer;
