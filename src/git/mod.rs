pub mod changes;
pub mod history;
pub mod log;
pub mod range;
pub mod repository;
pub mod tags;

#[cfg(test)]
pub mod test_support;

pub use repository::{GitRepository, SharedRepo};
