//! Infrastructure layer: concrete implementations of domain repositories.

pub mod persistence;
