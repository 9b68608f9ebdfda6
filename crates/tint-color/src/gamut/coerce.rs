//! RGB view of the cylindrical sRGB spaces.
//!
//! HSL, HSV and HWB describe the same cube as their RGB base, just bent
//! into a cylinder. Ray tracing needs the cube, so [`CoercedRgb`] wraps one
//! of them as a synthetic RGB space whose base is the cylinder:
//!
//! ```text
//! -rgb-hsl --to_base--> hsl --to_base--> srgb ...
//! ```
//!
//! Non-unit saturation or lightness ranges are undone before the cylinder
//! formulas run and reapplied on the way back.

use std::sync::Arc;

use tint_core::{Channel, DynamicRange, Space, SpaceError, SpaceKind, SpaceResult};
use tint_spaces::cylinder::{hsl_to_srgb, hsv_to_srgb, hwb_to_srgb, srgb_to_hsl, srgb_to_hsv, srgb_to_hwb};
use tint_spaces::rgb::RGB_CHANNELS;
use tint_spaces::SpaceRef;

type Formula = fn([f64; 3]) -> [f64; 3];

/// A cylindrical space presented as an RGB cube.
#[derive(Debug, Clone)]
pub struct CoercedRgb {
    inner: SpaceRef,
    name: &'static str,
    to_rgb: Formula,
    from_rgb: Formula,
    indexes: [usize; 3],
    scale_sat: f64,
    scale_light: f64,
}

impl CoercedRgb {
    /// Wraps `space`, which must be HSL, HSV or HWB shaped.
    pub fn new(space: SpaceRef) -> SpaceResult<Self> {
        let (name, to_rgb, from_rgb): (&'static str, Formula, Formula) = match space.kind() {
            SpaceKind::Hsl => ("-rgb-hsl", hsl_to_srgb, srgb_to_hsl),
            SpaceKind::Hsv => ("-rgb-hsv", hsv_to_srgb, srgb_to_hsv),
            SpaceKind::Hwb => ("-rgb-hwb", hwb_to_srgb, srgb_to_hwb),
            _ => {
                return Err(SpaceError::NotRgb {
                    space: space.name().to_string(),
                });
            }
        };
        let indexes = space.indexes();
        let channels = space.channels();
        Ok(Self {
            name,
            to_rgb,
            from_rgb,
            indexes,
            scale_sat: channels[indexes[1]].high,
            scale_light: channels[indexes[2]].high,
            inner: space,
        })
    }

    /// `space` itself when it is already RGB, else its coerced cube.
    pub fn rgb_view(space: &SpaceRef) -> SpaceResult<SpaceRef> {
        match space.kind() {
            SpaceKind::Rgb => Ok(Arc::clone(space)),
            SpaceKind::Hsl | SpaceKind::Hsv | SpaceKind::Hwb => Ok(Arc::new(Self::new(Arc::clone(space))?)),
            _ => Err(SpaceError::NotRgb {
                space: space.name().to_string(),
            }),
        }
    }

    /// The wrapped cylindrical space.
    pub fn inner(&self) -> &SpaceRef {
        &self.inner
    }
}

impl Space for CoercedRgb {
    fn name(&self) -> &'static str {
        self.name
    }

    fn base(&self) -> Option<&'static str> {
        Some(self.inner.name())
    }

    fn channels(&self) -> &[Channel; 3] {
        &RGB_CHANNELS
    }

    fn kind(&self) -> SpaceKind {
        SpaceKind::Rgb
    }

    fn to_base(&self, coords: [f64; 3]) -> [f64; 3] {
        let [h, s, l] = (self.from_rgb)(coords);
        let mut out = [0.0; 3];
        out[self.indexes[0]] = h;
        out[self.indexes[1]] = s * self.scale_sat;
        out[self.indexes[2]] = l * self.scale_light;
        out
    }

    fn from_base(&self, coords: [f64; 3]) -> [f64; 3] {
        let h = coords[self.indexes[0]];
        let s = coords[self.indexes[1]] / self.scale_sat;
        let l = coords[self.indexes[2]] / self.scale_light;
        (self.to_rgb)([h, s, l])
    }

    fn white(&self) -> [f64; 2] {
        self.inner.white()
    }

    fn dynamic_range(&self) -> DynamicRange {
        self.inner.dynamic_range()
    }

    fn is_achromatic(&self, coords: [f64; 3]) -> bool {
        self.inner.is_achromatic(self.to_base(coords))
    }
}
