//! Backend implementations
//!
//! Remote HTTP providers live behind the same [`CompletionBackend`] trait
//! but outside this crate; what ships here is everything that works without
//! a network.
//!
//! [`CompletionBackend`]: crate::backend::CompletionBackend

pub mod command;
pub mod replay;

pub use command::CommandBackend;
pub use replay::ReplayBackend;
