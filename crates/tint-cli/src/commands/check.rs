//! Gamut membership command

use crate::CheckArgs;
use anyhow::{Context, Result};

pub fn run(args: CheckArgs, verbose: u8) -> Result<()> {
    let color = super::build_color(&args.color)?;
    let gamut = args.gamut.as_deref().unwrap_or(color.space_name());
    let inside = color
        .in_gamut_of(gamut, args.tolerance)
        .with_context(|| format!("Failed to check {color} against {gamut}"))?;

    if verbose > 0 {
        let mapped = color.convert(gamut)?;
        println!("{color} in {gamut}: {mapped}");
    }
    println!("{}", if inside { "in gamut" } else { "out of gamut" });
    Ok(())
}
