//! Space registry and conversion routing.
//!
//! Spaces form a tree through their `base` links. A conversion walks from
//! the source up to the first space shared with the destination's chain,
//! then down to the destination:
//!
//! ```text
//! hsl -> srgb -> srgb-linear -> xyz-d65 -> oklab -> oklch
//!        to_base ...........   common   from_base ......
//! ```

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use tint_core::{Space, SpaceError, SpaceResult};
use tracing::debug;

use crate::cylinder::{Hsl, Hsv, Hwb};
use crate::lab::{LabD65, LchD65};
use crate::oklab::{Oklab, Oklch};
use crate::primaries::{DISPLAY_P3, REC2020, SRGB};
use crate::rgb::{EncodedRgb, LinearRgb};
use crate::transfer::Transfer;
use crate::xyz::XyzD65;

/// Shared handle to a space.
pub type SpaceRef = Arc<dyn Space>;

static BUILTIN: LazyLock<Arc<SpaceRegistry>> = LazyLock::new(|| Arc::new(SpaceRegistry::with_builtins()));

/// Name-indexed set of spaces.
#[derive(Debug, Clone, Default)]
pub struct SpaceRegistry {
    spaces: HashMap<&'static str, SpaceRef>,
}

impl SpaceRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry holding the builtin spaces.
    pub fn builtin() -> Arc<SpaceRegistry> {
        Arc::clone(&BUILTIN)
    }

    /// Fresh registry with every builtin space.
    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        let builtins: Vec<SpaceRef> = vec![
            Arc::new(XyzD65),
            Arc::new(LinearRgb::new("srgb-linear", &SRGB)),
            Arc::new(EncodedRgb::new("srgb", "srgb-linear", Transfer::Srgb)),
            Arc::new(LinearRgb::new("display-p3-linear", &DISPLAY_P3)),
            Arc::new(EncodedRgb::new("display-p3", "display-p3-linear", Transfer::Srgb)),
            Arc::new(LinearRgb::new("rec2020-linear", &REC2020)),
            Arc::new(EncodedRgb::new("rec2020", "rec2020-linear", Transfer::Rec2020)),
            Arc::new(LinearRgb::new("rec2100-linear", &REC2020)),
            Arc::new(EncodedRgb::new("rec2100-pq", "rec2100-linear", Transfer::Pq).hdr()),
            Arc::new(Oklab),
            Arc::new(Oklch),
            Arc::new(LabD65),
            Arc::new(LchD65),
            Arc::new(Hsl),
            Arc::new(Hsv),
            Arc::new(Hwb),
        ];
        for space in builtins {
            // ordered so every base precedes its children
            if let Err(e) = reg.register(space) {
                tracing::warn!("skipping builtin space: {e}");
            }
        }
        reg
    }

    /// Adds a space. Its base, if any, must already be registered.
    ///
    /// Re-registering a name replaces the previous space.
    pub fn register(&mut self, space: SpaceRef) -> SpaceResult<()> {
        if let Some(base) = space.base() {
            if !self.spaces.contains_key(base) {
                return Err(SpaceError::MissingBase {
                    space: space.name().to_string(),
                    base: base.to_string(),
                });
            }
        }
        debug!(name = space.name(), base = ?space.base(), "register space");
        self.spaces.insert(space.name(), space);
        Ok(())
    }

    /// Looks up a space by name.
    pub fn get(&self, name: &str) -> SpaceResult<SpaceRef> {
        self.spaces
            .get(name)
            .cloned()
            .ok_or_else(|| SpaceError::UnknownSpace { name: name.to_string() })
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.spaces.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.spaces.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// `space` followed by its bases up to the root.
    ///
    /// `space` itself need not be registered, but its bases must be.
    pub fn chain(&self, space: &SpaceRef) -> SpaceResult<Vec<SpaceRef>> {
        let mut out = vec![Arc::clone(space)];
        let mut next = space.base();
        while let Some(name) = next {
            let base = self.get(name)?;
            next = base.base();
            out.push(base);
        }
        Ok(out)
    }

    /// Converts `coords` between two registered spaces by name.
    pub fn convert(&self, from: &str, to: &str, coords: [f64; 3]) -> SpaceResult<[f64; 3]> {
        self.convert_between(&self.get(from)?, &self.get(to)?, coords)
    }

    /// Converts `coords` from `from` to `to` through their common ancestor.
    pub fn convert_between(&self, from: &SpaceRef, to: &SpaceRef, coords: [f64; 3]) -> SpaceResult<[f64; 3]> {
        if from.name() == to.name() {
            return Ok(coords);
        }
        let up = self.chain(from)?;
        let down = self.chain(to)?;

        let (i, j) = up
            .iter()
            .enumerate()
            .find_map(|(i, s)| down.iter().position(|d| d.name() == s.name()).map(|j| (i, j)))
            .ok_or_else(|| SpaceError::NoConversionPath {
                from: from.name().to_string(),
                to: to.name().to_string(),
            })?;

        let mut c = coords;
        for space in &up[..i] {
            c = space.to_base(c);
        }
        for space in down[..j].iter().rev() {
            c = space.from_base(c);
        }
        Ok(c)
    }
}
