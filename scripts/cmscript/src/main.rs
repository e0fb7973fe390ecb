use clap::Parser;
use cmds::Cmd;

mod cmds;

/// Coverage checks of employment and address history forms.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: cmds::Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::new();
    logger.filter_level(log::LevelFilter::Off).parse_default_env();
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    log::info!("{:?}", cli);
    cli.command.run()
}
