//! Order endpoints.

mod handlers;

pub(crate) use handlers::get;
