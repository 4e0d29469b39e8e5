use apiforge::adapters::command_handler::CommandHandler;
use apiforge::cli::Cli;
use apiforge::config::Settings;
use clap::Parser;
use tracing::{debug, Level};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays pipeable JSON
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::new_with_cli(&cli)?;
    debug!("Loaded settings: {:?}", settings);

    let handler = CommandHandler::new(settings);
    let stdout = std::io::stdout();
    handler.run(&cli.command, &mut stdout.lock())?;

    Ok(())
}
