//! Prelude module importing the commonly used surface of both layers

pub use wellspring_datasource::prelude::*;
pub use wellspring_query::prelude::*;
