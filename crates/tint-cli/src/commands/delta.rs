//! Color difference command

use crate::DeltaArgs;
use anyhow::{Result, bail};
use tint_color::DeltaE;

pub fn run(args: DeltaArgs, verbose: u8) -> Result<()> {
    let method: DeltaE = args.method.parse()?;
    let a = super::build_color(&args.color)?;

    let [space, rest @ ..] = args.other.as_slice() else {
        bail!("--other needs a space and three coordinates");
    };
    let coords = rest
        .iter()
        .map(|s| super::parse_coord(s).map_err(anyhow::Error::msg))
        .collect::<Result<Vec<_>>>()?;
    let b = super::color_from_parts(space, &coords, 1.0)?;

    let de = a.delta_e(&b, method)?;
    if verbose > 0 {
        println!("{a} vs {b} (delta E {method})");
    }
    println!("{de:.6}");
    Ok(())
}
