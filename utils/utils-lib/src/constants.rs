//! Various common constants used by the plugins.

/// Default namespace of the OpenEBS control plane and its custom resources.
pub const DEFAULT_NAMESPACE: &str = "openebs";

/// Default timeout for any Kubernetes API request.
pub const DEFAULT_REQ_TIMEOUT: &str = "10s";

/// Log filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "warn";
