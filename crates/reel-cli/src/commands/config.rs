use super::load_config;
use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::eyre::{eyre, Context};
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use reel_config::{Config, PathManager, UpstreamFamily};
use serde_json::json;
use std::path::Path;

pub fn run_config(cmd: ConfigCommands, config_path: Option<&Path>, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, config_path, output),
        ConfigCommands::Init { upstream, force } => init_config(upstream, force, config_path, output),
    }
}

fn show_config(full: bool, config_path: Option<&Path>, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config = load_config(config_path, &paths)?;
    let config_file = config_path.map(Path::to_path_buf).unwrap_or_else(|| paths.config_file());

    let key_display = match config.upstream.credential() {
        Some(key) if full => key.to_string(),
        Some(key) => mask_string(key),
        None => "not set".to_string(),
    };

    output.data(&json!({
        "configFile": config_file,
        "dataDir": paths.data_dir(),
        "server": {
            "port": config.server.port,
            "bindAddress": config.server.bind_address,
            "staticDir": config.server.static_dir,
        },
        "upstream": {
            "family": config.upstream.family.as_str(),
            "apiKey": key_display,
            "baseUrl": config.upstream.base_url,
            "timeoutSecs": config.upstream.timeout_secs,
        },
        "client": {
            "gatewayUrl": config.client.gateway_url,
            "defaultSort": config.client.default_sort,
            "defaultType": config.client.default_type,
        },
    }));

    if !output.is_human() {
        return Ok(());
    }

    output.println(format!("\n{}", "Configuration".bright_cyan().bold()));
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("Setting").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Value").add_attribute(comfy_table::Attribute::Bold),
    ]);
    let exists = if config_file.exists() { "" } else { " (not created)" };
    table.add_row(vec!["Config file".to_string(), format!("{}{}", config_file.display(), exists)]);
    table.add_row(vec!["Data directory".to_string(), paths.data_dir().display().to_string()]);
    table.add_row(vec!["Listen".to_string(), format!("{}:{}", config.server.bind_address, config.server.port)]);
    table.add_row(vec![
        "Static files".to_string(),
        config
            .server
            .static_dir
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string()),
    ]);
    table.add_row(vec!["Upstream".to_string(), config.upstream.family.to_string()]);
    table.add_row(vec![
        "API key".to_string(),
        if config.upstream.is_configured() {
            key_display
        } else {
            key_display.red().to_string()
        },
    ]);
    if let Some(url) = &config.upstream.base_url {
        table.add_row(vec!["Upstream URL".to_string(), url.clone()]);
    }
    table.add_row(vec!["Gateway URL".to_string(), config.client.gateway_url.clone()]);
    table.add_row(vec!["Default sort".to_string(), config.client.default_sort.to_string()]);
    table.add_row(vec!["Default type".to_string(), config.client.default_type.to_string()]);
    output.println(table.to_string());

    if !config.upstream.is_configured() {
        output.warn(format!(
            "No API key configured. Set {} in the environment or .env file.",
            config.upstream.family.key_variables().join(" or ")
        ));
    }
    Ok(())
}

fn init_config(upstream: Option<UpstreamFamily>, force: bool, config_path: Option<&Path>, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config_file = config_path.map(Path::to_path_buf).unwrap_or_else(|| paths.config_file());

    if config_file.exists() && !force {
        output.warn(format!(
            "Configuration already exists at {} (use --force to overwrite)",
            config_file.display()
        ));
        return Ok(());
    }

    let mut config = Config::default();
    if let Some(family) = upstream {
        config.upstream.family = family;
    }

    paths
        .ensure_directories()
        .map_err(|e| eyre!("{}", e))
        .wrap_err("Failed to create data directories")?;
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("{}", e))
        .wrap_err_with(|| format!("Failed to write {}", config_file.display()))?;

    tracing::info!(operation = "config_init", path = %config_file.display(), "Configuration written");
    output.success(format!("Configuration written to {}", config_file.display()));
    output.println(format!(
        "API keys are read from the environment: {}",
        config.upstream.family.key_variables().join(", ")
    ));
    Ok(())
}

fn mask_string(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string_keeps_last_four() {
        assert_eq!(mask_string("abcdef123"), "*****f123");
        assert_eq!(mask_string("abc"), "***");
        assert_eq!(mask_string(""), "");
    }
}
