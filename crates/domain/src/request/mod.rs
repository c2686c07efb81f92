//! Request-side value types.

mod body;
mod method;
mod params;
mod path;
mod spec;

pub use body::RequestBody;
pub use method::HttpMethod;
pub use params::{Header, Headers, QueryParam, QueryParams};
pub use path::{expand_path, resolve_url};
pub use spec::RequestSpec;
