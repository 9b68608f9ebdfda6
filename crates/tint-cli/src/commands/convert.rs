//! Color conversion command

use crate::ConvertArgs;
use anyhow::{Context, Result};

pub fn run(args: ConvertArgs, verbose: u8) -> Result<()> {
    let color = super::build_color(&args.color)?;
    let mut out = color
        .convert(&args.to)
        .with_context(|| format!("Failed to convert {} to {}", color.space_name(), args.to))?;
    if args.normalize {
        out.normalize();
    }

    if verbose > 0 {
        println!("{color} -> {out}");
    } else {
        println!("{out}");
    }
    Ok(())
}
