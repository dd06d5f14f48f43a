//! CORS policy engine for an HTTP gateway.
//!
//! A [`Policy`] is normalized once from the gateway's extra config and handed to
//! the [`Cors`] engine, which turns each request into a [`CorsDecision`]. The
//! [`CorsLayer`] tower middleware applies those decisions to any `http` service.

mod allowed_headers;
mod allowed_methods;
pub mod config;
pub mod constants;
mod context;
mod cors;
pub mod debug;
mod duration;
mod exposed_headers;
mod header_builder;
mod headers;
pub mod middleware;
mod normalized_request;
mod origin;
mod policy;
mod result;
pub mod server;
mod util;

pub use allowed_headers::{AllowedHeaderList, AllowedHeaders};
pub use allowed_methods::AllowedMethods;
pub use config::{ExtraConfig, policy_from_extra_config, policy_from_section};
pub use context::RequestContext;
pub use cors::Cors;
pub use debug::{DebugLogger, DebugSink, TracingLogger};
pub use duration::{DurationError, parse_duration};
pub use exposed_headers::ExposedHeaders;
pub use headers::Headers;
pub use middleware::{CorsLayer, CorsService, ResponseFuture, build, build_with_logger};
pub use origin::{AllowedOrigins, OriginDecision, OriginMatcher, PatternError};
pub use policy::Policy;
pub use result::{ActualResult, CorsDecision, PreflightResult};
pub use server::{wrap_run_server, wrap_run_server_with_logger};
