mod commands;
mod terminal;

use commands::{CommandLine, discover};
use lanwarden_common::config::Config;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let cfg: Config = commands.config();

    logging::init(&cfg);

    print::header("getting ready for discovery", cfg.quiet);
    discover::discover(commands.target, &cfg).await
}
