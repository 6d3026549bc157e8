use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "copilot-relay",
    about = "Copilot Relay Server - local API proxy for upstream accounts",
    version = env!("CARGO_PKG_VERSION"),
    author
)]
pub struct Cli {
    #[arg(long, env = "COPILOT_RELAY_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(short, long, env = "COPILOT_RELAY_PORT", default_value = "4141")]
    pub port: u16,

    #[arg(
        short,
        long,
        env = "COPILOT_RELAY_ACCOUNT",
        help = "Account id to run with (defaults to the first account in config.yaml)"
    )]
    pub account: Option<String>,

    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}
