//! Gamut mapping commands

use crate::{FitArgs, FitBatchArgs};
use anyhow::{Context, Result, bail};
use std::time::Instant;
use tint_color::{Color, FitMethod, fit_all};
use tracing::info;

pub fn run(args: FitArgs, verbose: u8) -> Result<()> {
    let method: FitMethod = args.fit.method.parse()?;
    let options = super::fit_options(&args.fit)?;
    let color = super::build_color(&args.color)?;

    if verbose > 0 {
        let inside = color.in_gamut_of(&args.fit.to, 0.0)?;
        println!("{color} {} {}", if inside { "inside" } else { "outside" }, args.fit.to);
    }

    let fitted = color
        .fit(&args.fit.to, method, &options)
        .with_context(|| format!("Failed to fit {color} into {}", args.fit.to))?;

    if args.target_coords {
        println!("{}", fitted.convert(&args.fit.to)?);
    } else {
        println!("{fitted}");
    }

    if verbose > 0 {
        let de = color.delta_e(&fitted, tint_color::DeltaE::Ok)?;
        println!("  delta E ok: {de:.6}");
    }
    Ok(())
}

pub fn run_batch(args: FitBatchArgs, verbose: u8) -> Result<()> {
    let method: FitMethod = args.fit.method.parse()?;
    let options = super::fit_options(&args.fit)?;
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read: {}", args.input.display()))?;
    let colors = parse_colors(&text)?;

    let start = Instant::now();
    let results = fit_all(&colors, &args.fit.to, method, &options);
    info!(count = colors.len(), elapsed = ?start.elapsed(), "batch fitted");

    let mut failed = 0usize;
    for (color, result) in colors.iter().zip(results) {
        match result {
            Ok(fitted) => println!("{fitted}"),
            Err(e) => {
                failed += 1;
                eprintln!("{color}: {e}");
            }
        }
    }

    if verbose > 0 {
        println!("Fitted {} colors with {method} in {:.2?}", colors.len(), start.elapsed());
    }
    if failed > 0 {
        bail!("{failed} of {} colors failed", colors.len());
    }
    Ok(())
}

/// Parses `<space> <c1> <c2> <c3> [alpha]` lines; blank lines and `#` comments are skipped.
fn parse_colors(text: &str) -> Result<Vec<Color>> {
    let mut colors = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        let (space, rest) = match fields.as_slice() {
            [space, rest @ ..] if rest.len() == 3 || rest.len() == 4 => (*space, rest),
            _ => bail!("line {}: expected '<space> c1 c2 c3 [alpha]'", n + 1),
        };
        let values = rest
            .iter()
            .map(|s| super::parse_coord(s).map_err(anyhow::Error::msg))
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("line {}", n + 1))?;
        let alpha = values.get(3).copied().unwrap_or(1.0);
        colors.push(
            super::color_from_parts(space, &values[..3], alpha).with_context(|| format!("line {}", n + 1))?,
        );
    }
    Ok(colors)
}
