use crate::domain::models::StudioConfig;
use std::path::Path;

pub fn load_config(dir: &Path) -> anyhow::Result<StudioConfig> {
    let path = dir.join("config.toml");
    if !path.exists() {
        return Ok(StudioConfig::default());
    }
    let raw = std::fs::read_to_string(&path)?;
    let cfg: StudioConfig = toml::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?;
    tracing::debug!(workspace = %cfg.workspace.id, "config loaded");
    Ok(cfg)
}
