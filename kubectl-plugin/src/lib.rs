use crate::{
    kube_wrapper::ClientSet,
    operations::{Describe, List, Operations, PluginResult, Stats},
    resources::{utils::OutputFormat, volume, VolumeResources},
};
use std::path::PathBuf;
use utils::tracing_telemetry::{FmtLayer, FmtStyle, TracingTelemetry};

pub mod kube_wrapper;
pub mod operations;
pub mod resources;

/// Every plugin operation must implement this trait to become composable.
#[async_trait::async_trait(?Send)]
pub trait ExecuteOperation {
    type Args;
    type Error;
    async fn execute(&self, cli_args: &Self::Args) -> Result<(), Self::Error>;
}

#[derive(clap::Args, Debug)]
pub struct CliArgs {
    /// Path to kubeconfig file.
    #[clap(global = true, long, short = 'k')]
    pub kube_config_path: Option<PathBuf>,

    /// The Output, viz yaml, json.
    #[clap(global = true, default_value = OutputFormat::None.as_ref(), short, long)]
    pub output: OutputFormat,

    /// Timeout for the Kubernetes API requests.
    #[clap(global = true, long, short, default_value = utils::DEFAULT_REQ_TIMEOUT)]
    pub timeout: humantime::Duration,
}

impl CliArgs {
    /// Initialize tracing.
    /// Logs always go to stderr so that they never interleave with the tabular output.
    pub fn init_tracing(&self) {
        let style = match std::env::var("RUST_LOG") {
            Ok(_) => FmtStyle::Pretty,
            Err(_) => FmtStyle::Compact,
        };

        TracingTelemetry::builder()
            .with_writer(FmtLayer::Stderr)
            .with_style(style)
            .with_colours(false)
            .with_default_filter(utils::DEFAULT_LOG_FILTER)
            .init(env!("CARGO_PKG_NAME"));
    }

    /// Create the Kubernetes client from the kubeconfig arguments.
    pub async fn client(&self) -> Result<ClientSet, resources::Error> {
        ClientSet::new(self.kube_config_path.clone(), *self.timeout).await
    }
}

#[async_trait::async_trait(?Send)]
impl ExecuteOperation for Operations {
    type Args = CliArgs;
    type Error = resources::Error;
    async fn execute(&self, cli_args: &CliArgs) -> PluginResult {
        match self {
            Operations::Volume(resource) => resource.execute(cli_args).await,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl ExecuteOperation for VolumeResources {
    type Args = CliArgs;
    type Error = resources::Error;
    async fn execute(&self, cli_args: &CliArgs) -> PluginResult {
        match self {
            VolumeResources::List(args) => {
                let client = cli_args.client().await?;
                volume::Volumes::list(&client, args, &cli_args.output).await
            }
            VolumeResources::Describe(args) => {
                let client = cli_args.client().await?;
                volume::Volume::describe(&client, args, &cli_args.output).await
            }
            VolumeResources::Stats(args) => volume::Volume::stats(args).await,
        }
    }
}
