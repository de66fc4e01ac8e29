use std::path::PathBuf;

use clap::Parser;

/// Valant: minimal inventory REST service.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Address to bind the web server to.
    #[arg(long, default_value = "127.0.0.1", env = "VALANT_BIND")]
    pub bind: String,

    /// Port to listen on.
    #[arg(long, default_value = "8080", env = "VALANT_PORT")]
    pub port: u16,

    /// Path to the JSONL item data file.
    /// If omitted, items are in-memory only.
    #[arg(long, env = "VALANT_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Number of removal events that may wait in the notification queue
    /// before deletes block on publishing.
    #[arg(long, default_value = "64", env = "VALANT_NOTIFY_CAPACITY")]
    pub notify_capacity: usize,

    /// Browser origin allowed to call the API cross-origin (e.g.
    /// `http://localhost:3000`). CORS is disabled when omitted.
    #[arg(long, env = "VALANT_CORS_ORIGIN")]
    pub cors_origin: Option<String>,
}
