use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use geocontext::geoplateforme::{Endpoints, DEFAULT_APICARTO_URL, DEFAULT_GPF_URL};
use geocontext::Selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human readable lines
    Simple,
    /// One JSON object per line
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Simple => write!(f, "simple"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Geographic context API (altitude, admin units, parcels, urbanism)")]
pub struct Args {
    /// Listen host
    #[arg(long, env = "APP_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Listen port
    #[arg(short, long, env = "APP_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Log filter (ex: "info", "geocontext=debug,tower_http=info")
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Simple)]
    pub log_format: LogFormat,

    /// Directory served for any non-API path
    #[arg(long, env = "STATIC_DIR", default_value = "public")]
    pub static_dir: PathBuf,

    /// Géoplateforme base URL
    #[arg(long, env = "GPF_URL", default_value = DEFAULT_GPF_URL)]
    pub gpf_url: String,

    /// API Carto base URL
    #[arg(long, env = "APICARTO_URL", default_value = DEFAULT_APICARTO_URL)]
    pub apicarto_url: String,

    /// Which feature to keep per category
    #[arg(long, env = "SELECTION", value_enum, default_value_t = Selection::Legacy)]
    pub selection: Selection,
}

impl Args {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn endpoints(&self) -> Result<Endpoints> {
        Endpoints::new(&self.gpf_url, &self.apicarto_url)
    }
}

/// Install the global tracing subscriber
pub fn init_logging(level: &str, format: LogFormat) -> Result<()> {
    let filter =
        EnvFilter::try_new(level).with_context(|| format!("invalid LOG_LEVEL {:?}", level))?;
    let builder = FmtSubscriber::builder().with_env_filter(filter);

    match format {
        LogFormat::Simple => tracing::subscriber::set_global_default(builder.finish())?,
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
    }

    Ok(())
}
