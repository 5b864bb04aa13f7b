use clap::Parser;
use color_eyre::eyre::Result;
use log::*;

use sync_branches::{
    SyncOrchestrator,
    cli::Args,
    forge::{github::Github, manager::ForgeManager},
    outputs::{ActionOutputs, Annotation, annotate},
};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("sync_branches")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

async fn sync(args: &Args) -> sync_branches::Result<()> {
    let remote_config = args.remote_config()?;
    let run_config = args.run_config()?;

    debug!("run configuration: {:#?}", run_config);

    let forge = ForgeManager::new(Box::new(Github::new(remote_config)?));
    let outcome = SyncOrchestrator::new(forge).run(&run_config).await?;

    if let Some(pr) = outcome.pull_request() {
        ActionOutputs::from_env().set_pull_request(pr).await?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli_args = Args::parse();

    initialize_logger(cli_args.debug_enabled())?;

    if let Err(err) = sync(&cli_args).await {
        error!("{err}");
        annotate(Annotation::Error, &err.to_string());
        return Err(err.into());
    }

    Ok(())
}
