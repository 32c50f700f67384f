mod error;
mod parser;
mod summary;
mod types;

pub use parser::load_log;
pub use summary::Summary;
pub use types::{Gateway, Reading};

#[cfg(test)]
pub(crate) use types::fixtures;
