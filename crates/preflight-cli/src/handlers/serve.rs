//! Serve command handler

use crate::config::ServerConfig;
use crate::error::CliResult;
use crate::server;
use crate::ServeArgs;

/// Build server config from CLI args
#[must_use]
pub fn build_server_config(args: &ServeArgs) -> ServerConfig {
    ServerConfig::builder()
        .host(args.host.clone())
        .port(args.port)
        .cors(args.cors)
        .build()
}

/// Execute the serve command (blocks until Ctrl+C)
pub fn execute_serve(args: &ServeArgs) -> CliResult<()> {
    let config = build_server_config(args);
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(server::run(config))
}
