pub mod inspect;
pub mod run;

use std::path::Path;

use anyhow::Context;
use warpgrid_rotation::{Rotation, RotationConfig};

/// Load a rotation of string values from a TOML config file.
pub fn load(path: &str) -> anyhow::Result<Rotation<String>> {
    let config: RotationConfig<String> = RotationConfig::from_file(Path::new(path))
        .with_context(|| format!("failed to read rotation config {path}"))?;
    Ok(config.build()?)
}
