//! Space listing command

use anyhow::Result;
use tint_spaces::SpaceRegistry;

pub fn run(verbose: u8) -> Result<()> {
    let registry = SpaceRegistry::builtin();
    for name in registry.names() {
        if verbose == 0 {
            println!("{name}");
            continue;
        }
        let space = registry.get(name)?;
        let channels: Vec<&str> = space.channels().iter().map(|c| c.name).collect();
        println!(
            "{name:<16} {:<6} base={:<14} channels={}",
            format!("{:?}", space.kind()),
            space.base().unwrap_or("-"),
            channels.join(",")
        );
    }
    Ok(())
}
