use crate::resources::volume::{VolumeDescribeArgs, VolumeListArgs, VolumeStatsArgs};

pub mod constant;
pub mod crd;
pub mod error;
pub mod utils;
pub mod volume;

pub use error::Error;

pub type VolumeName = String;

/// The operations supported on volume resources.
#[derive(clap::Subcommand, Debug)]
pub enum VolumeResources {
    /// List the cStor volumes of the namespace.
    List(VolumeListArgs),
    /// Describe the volume with the given name, along with its target portal and replicas.
    Describe(VolumeDescribeArgs),
    /// Show the statistics of the volume with the given name (reserved, not reported yet).
    Stats(VolumeStatsArgs),
}
