//! CLI command implementations

pub mod check;
pub mod convert;
pub mod delta;
pub mod fit;
pub mod spaces;

use anyhow::{Context, Result, bail};
use std::path::Path;
use tint_color::{Color, DeltaE, FitOptions};

use crate::{ColorArg, FitFlags};

/// Parses one channel value; `none` is an undefined channel.
pub fn parse_coord(s: &str) -> Result<f64, String> {
    if s.eq_ignore_ascii_case("none") {
        return Ok(f64::NAN);
    }
    s.parse::<f64>().map_err(|e| format!("'{s}': {e}"))
}

/// Builds a color from `<space>` and three coordinate strings.
pub fn color_from_parts(space: &str, coords: &[f64], alpha: f64) -> Result<Color> {
    let [a, b, c] = coords else {
        bail!("expected 3 coordinates for {space}, got {}", coords.len());
    };
    Color::new(space, [*a, *b, *c], alpha).with_context(|| format!("Invalid color in '{space}'"))
}

/// Builds the color named on the command line.
pub fn build_color(arg: &ColorArg) -> Result<Color> {
    color_from_parts(&arg.space, &arg.coords, arg.alpha)
}

/// Loads fit options from an optional YAML file.
pub fn load_options(path: Option<&Path>) -> Result<FitOptions> {
    let Some(path) = path else {
        return Ok(FitOptions::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read: {}", path.display()))?;
    serde_yaml::from_str(&text).with_context(|| format!("Failed to parse: {}", path.display()))
}

/// Applies command line flags over file or default options.
pub fn merge_flags(mut options: FitOptions, flags: &FitFlags) -> Result<FitOptions> {
    if let Some(jnd) = flags.jnd {
        options.jnd = Some(jnd);
    }
    if let Some(eps) = flags.epsilon {
        options.epsilon = Some(eps);
    }
    if let Some(de) = &flags.delta_e {
        options.delta_e = Some(de.parse::<DeltaE>()?);
    }
    if let Some(pspace) = &flags.pspace {
        options.pspace = Some(pspace.clone());
    }
    if let Some(adaptive) = flags.adaptive {
        options.adaptive = adaptive;
    }
    if let Some(n) = flags.max_iterations {
        options.max_iterations = n;
    }
    if let Some(n) = flags.traces {
        options.traces = Some(n);
    }
    if flags.encoded {
        options.linear = Some(false);
    }
    if flags.clip_negative {
        options.clip_negative = true;
    }
    Ok(options)
}

/// Resolves the full option set for a fit command.
pub fn fit_options(flags: &FitFlags) -> Result<FitOptions> {
    let base = load_options(flags.config.as_deref())?;
    merge_flags(base, flags)
}
