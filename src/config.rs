// config.rs
use chrono_tz::Tz;
use clap::Parser;
use std::net::SocketAddr;

// Routes of the operations API (host/port come from the CLI).
pub const GET_CLOTHES_ROUTE: &str = "api/operations/get_clothes";
pub const GET_REQUESTS_ROUTE: &str = "api/operations/get_requests";
pub const UPDATE_REQUESTS_ROUTE: &str = "api/operations/update_requests";

#[derive(Debug, Clone, Parser)]
#[command(name = "sales-dashboard")]
#[command(about = "Dashboard to search clothes and edit saved searches", long_about = None)]
pub struct Config {
    /// Operations API host (scheme included)
    #[arg(long, default_value = "http://127.0.0.1", env = "API_HOST")]
    pub api_host: String,

    /// Operations API port
    #[arg(short, long, default_value_t = 8000, env = "API_PORT")]
    pub port: u16,

    /// Address the dashboard listens on
    #[arg(short, long, default_value = "127.0.0.1:3000", env = "BIND_ADDRESS")]
    pub bind: SocketAddr,

    /// Output log file
    #[arg(short, long, default_value = "sales_dashboard.log", env = "LOG_FILE")]
    pub log: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,

    /// Timezone listing dates are displayed in
    #[arg(long, default_value = "Europe/Brussels", env = "DISPLAY_TZ")]
    pub timezone: Tz,

    #[arg(long, default_value_t = 8)]
    pub workers: usize,
}

impl Config {
    pub fn api_base_url(&self) -> String {
        format!("{}:{}", self.api_host.trim_end_matches('/'), self.port)
    }
}
