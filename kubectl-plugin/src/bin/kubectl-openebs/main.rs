use clap::Parser;
use plugin::{operations::Operations, CliArgs, ExecuteOperation};

#[derive(Parser, Debug)]
#[clap(
    name = "kubectl-openebs",
    about = utils::package_description!(),
    version = utils::version_info_str!()
)]
struct Cli {
    #[clap(flatten)]
    args: CliArgs,

    /// The operation to be performed.
    #[clap(subcommand)]
    operations: Operations,
}

impl Cli {
    fn args() -> Self {
        Cli::parse()
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::args();
    cli.args.init_tracing();

    if let Err(error) = cli.operations.execute(&cli.args).await {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
