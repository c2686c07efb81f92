//! Response-side value types.

mod spec;

pub use spec::ResponseSpec;
