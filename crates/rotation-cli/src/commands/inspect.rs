//! `warp-rotate inspect` — print a rotation's entries without drawing.

pub fn inspect(config: &str) -> anyhow::Result<()> {
    let rotation = super::load(config)?;
    let snapshot = rotation.snapshot();

    println!("{} entries", snapshot.len());
    for (position, entry) in snapshot.iter().enumerate() {
        let marker = if entry.current {
            "*"
        } else if entry.pending {
            ">"
        } else {
            " "
        };
        println!(
            "{marker} {position:>3}  {:<32} weight={} usage={}",
            entry.value, entry.weight, entry.usage
        );
    }
    Ok(())
}
