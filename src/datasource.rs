//! Data-source construction: dialect descriptors, the staged builder and
//! the pooled connection source.
//!
//! Re-exports [`wellspring_datasource`].

pub use wellspring_datasource::*;
