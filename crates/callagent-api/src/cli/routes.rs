//! `callagent routes` - list mounted route groups.

use anyhow::Context;

use crate::cli::ConfigArgs;
use crate::cli::config::load;
use crate::http::gateway;

pub async fn list_routes(args: &ConfigArgs, json: bool) -> anyhow::Result<()> {
    let settings = load(args).await?;
    let gateway = gateway::from_settings(&settings).context("Failed to assemble gateway")?;
    let prefixes = gateway.prefixes();

    if json {
        let out = serde_json::json!({
            "root": "/",
            "mounts": prefixes,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        console::style(&gateway.metadata().name).bold(),
        console::style(format!("v{}", gateway.metadata().version)).dim()
    );
    println!();
    println!("  {}  welcome", console::style("GET /").cyan());
    for prefix in prefixes {
        println!("  {}", console::style(format!("*   {prefix}/...")).cyan());
    }
    println!();
    Ok(())
}
