/// Revision reported when the build did not provide `GIT_VERSION`.
const UNKNOWN_REVISION: &str = "unknown";

/// The git revision the binary was built from, as provided by the build environment.
pub fn raw_version_str() -> &'static str {
    option_env!("GIT_VERSION").unwrap_or(UNKNOWN_REVISION)
}
