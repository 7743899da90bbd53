pub mod constants;
pub use constants::*;

pub mod tracing_telemetry;

pub mod version;

pub use version::raw_version_str;

pub mod macros {
    /// Returns the package description of the calling crate.
    #[macro_export]
    macro_rules! package_description {
        () => {
            env!("CARGO_PKG_DESCRIPTION")
        };
    }

    /// Gets package's version info as a String.
    #[macro_export]
    macro_rules! version_info_string {
        () => {
            format!(
                "{} (revision {})",
                env!("CARGO_PKG_VERSION"),
                $crate::raw_version_str()
            )
        };
    }

    /// Gets package's version info as a static str.
    /// Each call to this macro leaks a string.
    #[macro_export]
    macro_rules! version_info_str {
        () => {
            Box::leak(Box::new($crate::version_info_string!())) as &'static str
        };
    }
}
