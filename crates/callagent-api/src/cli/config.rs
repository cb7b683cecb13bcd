//! `callagent config` - validate and print the effective settings.

use anyhow::Context;

use callagent_types::config::Settings;

use crate::cli::ConfigArgs;
use crate::http::gateway;

/// Load settings from file and environment. Any error is fatal.
pub async fn load(args: &ConfigArgs) -> anyhow::Result<Settings> {
    callagent_infra::config::load_settings(args.config.as_deref())
        .await
        .context("Failed to load settings")
}

/// Print the settings the server would start with.
///
/// The gateway is assembled as well, so a policy that loads but cannot be
/// turned into middleware is reported here rather than at deploy time.
pub async fn show_config(args: &ConfigArgs, json: bool) -> anyhow::Result<()> {
    let settings = load(args).await?;
    gateway::build_router(&settings).context("Invalid gateway configuration")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
    } else {
        println!("{}", toml::to_string_pretty(&settings)?);
        if settings.cors.allowed_origins.is_permissive() {
            eprintln!(
                "  {} cors.allowed_origins is \"*\"; restrict it for production",
                console::style("!").yellow().bold()
            );
        }
    }
    Ok(())
}
