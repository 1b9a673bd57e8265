use clap::Parser;

use devflow::{Outcome, Result, Workflow, cli, config::Config};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("devflow")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli_args = cli::Args::parse();

    initialize_logger(cli_args.debug)?;

    let config = Config::load(&cli_args.config)?;
    let workflow = Workflow::from_config(config)?;

    if let Outcome::Aborted(reason) = workflow.run(cli_args.command).await? {
        log::debug!("command aborted: {reason}");
    }

    Ok(())
}
