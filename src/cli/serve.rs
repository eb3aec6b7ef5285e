//! study-organizer serve command implementation

use super::Context;
use crate::error::Result;
use crate::server;

/// Options for the serve command
pub struct ServeOptions {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub no_cors: bool,
}

pub fn run(context: Context, options: ServeOptions) -> Result<()> {
    let mut config = context.config;
    if let Some(host) = options.host {
        config.server.host = host;
    }
    if let Some(port) = options.port {
        config.server.port = port;
    }
    if options.no_cors {
        config.server.cors = false;
    }
    config.validate()?;

    if !context.output.quiet && !context.output.json {
        eprintln!(
            "study-organizer: serving on http://{}:{} (dashboard at /app)",
            config.server.host, config.server.port
        );
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server::serve(&config))
}
