use clap::Parser;

/// Escargot'Alerte CLI arguments
#[derive(Debug, Parser)]
#[command(
    name = "escargot-alerte",
    version,
    about = "Weather monitoring and alerting for snail-activity zones"
)]
pub struct Cli {
    /// Weather API base URL
    #[arg(long)]
    pub weather_url: Option<String>,

    /// Condition check interval in seconds
    #[arg(long)]
    pub check_interval: Option<u64>,

    /// HTTP port to listen on
    #[arg(long)]
    pub port: Option<u16>,
}
