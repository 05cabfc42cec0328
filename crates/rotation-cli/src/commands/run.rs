//! `warp-rotate run` — draw selections from a configured rotation.

use anyhow::bail;
use tracing::info;
use warpgrid_rotation::Rotation;

/// Most selections a single invocation will draw.
const MAX_COUNT: usize = 1_000_000;

pub fn run(config: &str, count: usize, batch: Option<usize>, format: &str) -> anyhow::Result<()> {
    if count > MAX_COUNT {
        bail!("count {count} exceeds the limit of {MAX_COUNT} selections");
    }
    let rotation = super::load(config)?;
    let picks = draw(&rotation, count, batch)?;
    info!(count = picks.len(), entries = rotation.len(), "drew selections");

    match format {
        "json" => {
            let output = serde_json::json!({
                "selections": picks,
                "entries": rotation.snapshot(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        "text" => {
            for pick in &picks {
                println!("{pick}");
            }
        }
        other => bail!("unknown output format: {other} (expected text or json)"),
    }
    Ok(())
}

/// Draw `count` selections, `batch` at a time when a batch size is given.
fn draw(rotation: &Rotation<String>, count: usize, batch: Option<usize>) -> anyhow::Result<Vec<String>> {
    let mut picks = Vec::with_capacity(count.min(MAX_COUNT));
    match batch {
        Some(size) => {
            while picks.len() < count {
                let take = size.min(count - picks.len());
                picks.extend(rotation.next_batch(take)?);
            }
        }
        None => {
            for _ in 0..count {
                picks.push(rotation.next()?);
            }
        }
    }
    Ok(picks)
}
