use crate::{
    kube_wrapper::ClusterSource,
    resources::{error::Error, utils, VolumeResources},
};
use async_trait::async_trait;

/// Result wrapper for plugin commands.
pub type PluginResult = Result<(), Error>;

/// The types of operations that are supported.
#[derive(clap::Subcommand, Debug)]
pub enum Operations {
    /// 'Volume' resources.
    #[clap(subcommand)]
    Volume(VolumeResources),
}

/// List trait.
/// To be implemented by resources which support the 'list' operation, with context.
#[async_trait(?Send)]
pub trait List {
    type Context;
    async fn list<S: ClusterSource + ?Sized>(
        source: &S,
        context: &Self::Context,
        output: &utils::OutputFormat,
    ) -> PluginResult;
}

/// Describe trait.
/// To be implemented by resources which support the 'describe' operation.
#[async_trait(?Send)]
pub trait Describe {
    type Context;
    async fn describe<S: ClusterSource + ?Sized>(
        source: &S,
        context: &Self::Context,
        output: &utils::OutputFormat,
    ) -> PluginResult;
}

/// Stats trait.
/// To be implemented by resources which support the 'stats' operation.
#[async_trait(?Send)]
pub trait Stats {
    type Context;
    async fn stats(context: &Self::Context) -> PluginResult;
}
