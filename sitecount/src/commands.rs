use clap::arg;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("sitecount")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sitecount")
        .about("Crawl every internal page of a site and rank pages by how often they are linked")
        .styles(CLAP_STYLING)
        .arg(
            arg!(<URL>)
                .help("Root URL of the site to crawl, e.g. https://example.com")
                .value_parser(clap::value_parser!(String)),
        )
        .arg(
            arg!(--"max-pages" <NUM>)
                .required(false)
                .help("Stop entering new pages once this many distinct pages have been seen")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(--"keep-scheme")
                .required(false)
                .help("Keep the root URL's scheme instead of upgrading every page to https")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            arg!(-f --"format" <FORMAT>)
                .required(false)
                .help("Report format: text, json, csv")
                .value_parser(["text", "json", "csv"])
                .default_value("text"),
        )
        .arg(
            arg!(-o --"output" <PATH>)
                .required(false)
                .help("Save report to file (default: display to screen)")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            arg!(-q --"quiet")
                .required(false)
                .help("Only log warnings while crawling")
                .action(clap::ArgAction::SetTrue)
                .conflicts_with("verbose"),
        )
        .arg(
            arg!(-v --"verbose")
                .required(false)
                .help("Log every link as it is normalised")
                .action(clap::ArgAction::SetTrue),
        )
}
