//! Query factories, value/row types and the repository holder seam.
//!
//! Re-exports [`wellspring_query`].

pub use wellspring_query::*;
