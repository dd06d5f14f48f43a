//! Hook for the gateway's server start-up, so the CORS middleware sees every
//! request before the router selects a handler.

use crate::config::ExtraConfig;
use crate::debug::DebugLogger;
use crate::middleware::{CorsLayer, CorsService};
use std::sync::Arc;
use tower_layer::Layer;

/// Wraps `next` so that it receives the handler already wrapped by the CORS
/// middleware built from the service extra config. Without a policy the
/// wrapper is a disabled pass-through.
pub fn wrap_run_server<F, S, Fut>(next: F) -> impl Fn(ExtraConfig, S) -> Fut
where
    F: Fn(ExtraConfig, CorsService<S>) -> Fut,
{
    wrap_run_server_with_logger(next, None)
}

pub fn wrap_run_server_with_logger<F, S, Fut>(
    next: F,
    logger: Option<Arc<dyn DebugLogger>>,
) -> impl Fn(ExtraConfig, S) -> Fut
where
    F: Fn(ExtraConfig, CorsService<S>) -> Fut,
{
    move |extra: ExtraConfig, handler: S| {
        let layer = CorsLayer::from_extra_config_with_logger(&extra, logger.clone());
        next(extra, layer.layer(handler))
    }
}

#[cfg(test)]
#[path = "server_test.rs"]
mod server_test;
