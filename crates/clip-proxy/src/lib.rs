mod config;
mod env;
mod error;
mod openapi;
mod routes;

pub use config::ClipProxyConfig;
pub use env::{Env, filter_empty};
pub use error::ClipsError;
pub use openapi::openapi;
pub use routes::router;
