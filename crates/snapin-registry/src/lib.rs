//! Snap-in declaration registry.
//!
//! Provides [`DeclarationRegistry`], an in-memory [`TypeUniverse`] that a host
//! populates programmatically or from a JSON declaration document.
//!
//! [`TypeUniverse`]: snapin_core::TypeUniverse

mod registry;

pub use registry::DeclarationRegistry;
