//! Channel descriptors.
//!
//! Each space describes its coordinates with three [`Channel`]s. The
//! gamut verifier and clipper read nothing else:
//!
//! ```text
//! bound  angle   gamut check          clip
//! -----  -----   -----------          ----
//! yes    no      low <= v <= high     clamp into [low, high]
//! no     no      skipped              untouched
//! any    yes     skipped              wrap into [0, 360)
//! ```

/// Range and behavior of one coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Channel {
    /// Short channel name (`"r"`, `"l"`, `"h"`, ...).
    pub name: &'static str,
    /// Lower end of the nominal range.
    pub low: f64,
    /// Upper end of the nominal range.
    pub high: f64,
    /// Whether the range is a hard gamut limit.
    pub bound: bool,
    /// Whether the channel is a hue angle in degrees.
    pub angle: bool,
}

impl Channel {
    /// A gamut-limiting channel.
    pub const fn bounded(name: &'static str, low: f64, high: f64) -> Self {
        Self {
            name,
            low,
            high,
            bound: true,
            angle: false,
        }
    }

    /// A channel whose range is only nominal.
    pub const fn unbounded(name: &'static str, low: f64, high: f64) -> Self {
        Self {
            name,
            low,
            high,
            bound: false,
            angle: false,
        }
    }

    /// A hue angle in `[0, 360)`.
    pub const fn angle(name: &'static str) -> Self {
        Self {
            name,
            low: 0.0,
            high: 360.0,
            bound: false,
            angle: true,
        }
    }

    /// Whether the gamut verifier should check this channel.
    #[inline]
    pub fn is_checked(&self) -> bool {
        self.bound && !self.angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_flags() {
        assert!(Channel::bounded("r", 0.0, 1.0).is_checked());
        assert!(!Channel::unbounded("a", -0.4, 0.4).is_checked());
        let h = Channel::angle("h");
        assert!(!h.is_checked());
        assert_eq!(h.high, 360.0);
    }
}
