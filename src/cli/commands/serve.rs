//! Web server command.

use console::style;

use crate::config::Settings;

/// Start the web server.
pub async fn cmd_serve(settings: &Settings, bind: Option<&str>) -> anyhow::Result<()> {
    let (host, port) = match bind {
        Some(bind) => parse_bind_address(bind, &settings.host, settings.port)?,
        None => (settings.host.clone(), settings.port),
    };

    println!(
        "{} Starting CorBas backend at http://{}:{}",
        style("→").cyan(),
        host,
        port
    );
    println!("  Pipeline: {}", settings.pipeline.endpoint);
    match settings.lexicon_path {
        Some(ref path) => println!("  Lexicon:  {}", path.display()),
        None => println!("  Lexicon:  {}", style("none (rule-based fallback)").dim()),
    }
    println!("  Press Ctrl+C to stop");

    crate::server::serve(settings, &host, port).await
}

/// Parse a bind address that can be:
/// - Just a port: "8080" -> {default_host}:8080
/// - Just a host: "127.0.0.1" -> 127.0.0.1:{default_port}
/// - Host and port: "127.0.0.1:8080"
fn parse_bind_address(
    bind: &str,
    default_host: &str,
    default_port: u16,
) -> anyhow::Result<(String, u16)> {
    if let Ok(port) = bind.parse::<u16>() {
        return Ok((default_host.to_string(), port));
    }

    if let Some((host, port_str)) = bind.rsplit_once(':') {
        let port = port_str
            .parse::<u16>()
            .map_err(|_| anyhow::anyhow!("Invalid port in bind address: {}", bind))?;
        return Ok((host.to_string(), port));
    }

    Ok((bind.to_string(), default_port))
}
