// Adapters layer: concrete implementations of domain ports backed by external systems.

#[cfg(feature = "tabula")]
pub mod tabula;
