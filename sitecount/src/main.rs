use colored::*;
use sitecount::{command_argument_builder, handle_crawl, init_logging, log_level};

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let matches = cmd.get_matches();

    init_logging(log_level(
        matches.get_flag("quiet"),
        matches.get_flag("verbose"),
    ));

    if let Err(e) = handle_crawl(&matches).await {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}
