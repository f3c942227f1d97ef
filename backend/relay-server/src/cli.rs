use relay_config::Config;

use clap::Parser;

/// Relays queue messages to WebSocket subscribers
#[derive(Parser, Debug, Default)]
#[command(name = "relay-server", version, about)]
pub struct Cli {
    /// Address to bind (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides server.port)
    #[arg(long)]
    pub port: Option<u16>,

    /// Debug logging (overrides server.debug)
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Command-line flags take precedence over file and environment
    pub fn apply(&self, config: &mut Config) {
        if let Some(ref host) = self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.debug {
            config.server.debug = true;
        }
    }
}
