use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "resq-admin")]
#[command(about = "ResQ admin console - server-rendered operations dashboard")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Interface to bind (overrides BIND_HOST)")]
    pub host: Option<String>,

    #[arg(long, short, global = true, help = "Port to listen on (overrides PORT)")]
    pub port: Option<u16>,

    #[arg(long, global = true, help = "Operations API base URL (overrides BASE_API_URL)")]
    pub upstream_url: Option<String>,

    #[arg(long, global = true, help = "Directory served for static assets (overrides STATIC_DIR)")]
    pub static_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    #[command(about = "Run the console (default)")]
    Serve,

    #[command(about = "Print the effective configuration and exit")]
    Config {
        #[arg(long, help = "Output in JSON format")]
        json: bool,
    },
}

impl Cli {
    /// Command-line flags win over the environment.
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = &self.upstream_url {
            config.upstream.base_url = url.trim().to_string();
        }
        if let Some(dir) = &self.static_dir {
            config.server.static_dir = dir.clone();
        }
        config
    }

    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}

/// Effective configuration with the session secret masked.
pub fn describe_config(config: &AppConfig, as_json: bool) -> String {
    let secret = if config.uses_default_secret() { "(default)" } else { "(set)" };

    if as_json {
        return match serde_json::to_value(config) {
            Ok(mut value) => {
                value["session"]["secret"] = json!(secret);
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
            }
            Err(e) => json!({ "error": e.to_string() }).to_string(),
        };
    }

    format!(
        "environment:      {:?}\n\
         listen:           {}\n\
         static dir:       {}\n\
         upstream:         {}\n\
         upstream timeout: {}s\n\
         session ttl:      {}h\n\
         secure cookies:   {}\n\
         session secret:   {}",
        config.environment,
        config.bind_addr(),
        config.server.static_dir.display(),
        config.upstream.base_url,
        config.upstream.timeout_secs,
        config.session.ttl_hours,
        config.session.secure_cookies,
        secret,
    )
}
