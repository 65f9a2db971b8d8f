use std::collections::HashMap;
use std::path::PathBuf;

use empty_latent_plugin::register_nodes;
use latent_host::{
    HostError, PinValue, PluginManager, PropertyValue, create_plugin_manager, load_config,
};
use serde_json::json;

const USAGE: &str = "usage: empty-latent [--config <host.toml>] list\n       \
                     empty-latent [--config <host.toml>] run <node_id> [key=value ...]";

fn main() -> Result<(), HostError> {
    env_logger::init();
    run(std::env::args().skip(1).collect())
}

fn run(args: Vec<String>) -> Result<(), HostError> {
    let (config_path, args) = split_config_arg(args)?;

    let config = load_config(config_path.as_deref());
    let manager = create_plugin_manager(&config);
    register_nodes(&manager)?;

    match args.first().map(String::as_str) {
        Some("list") => {
            let types = manager.node_types()?;
            println!("{}", serde_json::to_string_pretty(&types)?);
        }
        Some("run") => {
            let node_id = args
                .get(1)
                .ok_or_else(|| HostError::InvalidArgument(USAGE.to_string()))?;
            let values = parse_values(&args[2..])?;
            let report = run_report(&manager, node_id, values)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => return Err(HostError::InvalidArgument(USAGE.to_string())),
    }
    Ok(())
}

/// Strips a leading `--config <path>` and returns it with the remaining args.
fn split_config_arg(mut args: Vec<String>) -> Result<(Option<PathBuf>, Vec<String>), HostError> {
    if args.first().map(String::as_str) != Some("--config") {
        return Ok((None, args));
    }
    if args.len() < 2 {
        return Err(HostError::InvalidArgument(USAGE.to_string()));
    }
    let path = PathBuf::from(args.remove(1));
    args.remove(0);
    Ok((Some(path), args))
}

/// `key=value` pairs; values that parse as integers become integers.
fn parse_values(pairs: &[String]) -> Result<HashMap<String, PropertyValue>, HostError> {
    pairs
        .iter()
        .map(|pair| {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                HostError::InvalidArgument(format!("expected key=value, got '{}'", pair))
            })?;
            let value = match value.parse::<i64>() {
                Ok(i) => PropertyValue::Integer(i),
                Err(_) => PropertyValue::from(value),
            };
            Ok((key.to_string(), value))
        })
        .collect()
}

fn run_report(
    manager: &PluginManager,
    node_id: &str,
    values: HashMap<String, PropertyValue>,
) -> Result<serde_json::Value, HostError> {
    let outputs = manager.execute_node(node_id, values)?;
    let latent = outputs
        .get("LATENT")
        .and_then(PinValue::as_latent)
        .ok_or_else(|| HostError::Node(format!("node '{}' returned no latent", node_id)))?;
    Ok(json!({
        "node": node_id,
        "shape": latent.shape(),
        "device": latent.device().to_string(),
        "width": outputs.get("width").map(|v| v.as_integer(0)),
        "height": outputs.get("height").map(|v| v.as_integer(0)),
    }))
}
