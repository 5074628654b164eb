use anyhow::Context;
use clap::Parser;

use road_hero::cli::{Cli, Command};
use road_hero::contact::ContactForm;
use road_hero::{app, headless};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => app::run(config),
        Command::Simulate { ticks, hidden } => {
            let report = headless::simulate(&config, ticks, hidden)?;
            println!("{}", serde_json::to_string_pretty(&report).context("failed to encode report")?);
            Ok(())
        }
        Command::Validate { name, phone, email, message } => {
            let form = ContactForm::new(name, phone, email, message);
            let contact = form.validate()?;
            println!("{}", serde_json::to_string_pretty(&contact).context("failed to encode contact")?);
            Ok(())
        }
    }
}
