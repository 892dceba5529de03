//! The copy engine.
//!
//! - [`Copier`] - Bounded, cancellable copy from any reader to any writer

mod engine;

pub use engine::Copier;
