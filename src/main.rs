use std::error::Error;

use clap::Parser;
use log::error;

use finance_tracker::cli::{self, Cli};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();

    if let Err(err) = cli::run(cli, &mut stdout) {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(&format!(": {cause}"));
            source = cause.source();
        }
        error!("{message}");
        std::process::exit(1);
    }
}
