//! `config` commands.

use crate::cli::output;
use crate::core::config::{Layers, Scope, StageConfiguration};
use crate::error::Result;

/// Print the local stage configs, or the merged view with `global`.
///
/// The merged view lists stages in lookup order: local before global.
pub fn print(global: bool, json: bool) -> Result<()> {
    let layers = Layers::load()?;
    let cfg = if global { layers.merged() } else { layers.local };

    if json {
        println!("{}", serde_json::to_string_pretty(&cfg.configs)?);
        return Ok(());
    }

    if cfg.is_empty() {
        output::dimmed("no stage configs");
        return Ok(());
    }

    for (i, stage) in cfg.configs.iter().enumerate() {
        if i > 0 {
            output::rule();
        }
        output::header(&stage.name);
        output::kv("cert:    ", &stage.cert);
        output::kv("basePath:", &stage.base_path);
    }

    Ok(())
}

/// Append a stage to the local (or global) config file.
pub fn add(global: bool, stage: StageConfiguration) -> Result<()> {
    let scope = Scope::from_global_flag(global);
    let mut layers = Layers::load()?;

    if layers.merged().get_stage_config_by_name(&stage.name).is_ok() {
        output::warn(&format!(
            "stage {} already exists; lookups use the first match",
            output::key(&stage.name)
        ));
    }

    let name = stage.name.clone();
    let cfg = layers.scope_mut(scope);
    cfg.configs.push(stage);
    cfg.write(scope)?;

    let which = match scope {
        Scope::Global => "global",
        Scope::Local => "local",
    };
    output::success(&format!("added stage {} to {} config", output::key(&name), which));
    Ok(())
}
