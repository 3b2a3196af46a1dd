use std::time::Duration;

use crate::foundation::error::{VoxError, VoxResult};

/// Physical panel width in pixels (one row of the spinning arm, both ends).
pub const PANEL_WIDTH: usize = 64;
/// Physical panel height in pixels (one row per scene layer).
pub const PANEL_HEIGHT: usize = 32;
/// Bytes per packed panel row.
pub const ROW_BYTES: usize = PANEL_WIDTH / 8;
/// Size of one packed monochrome frame on the wire.
pub const FRAME_BYTES: usize = PANEL_HEIGHT * ROW_BYTES;
/// Number of [`Tick`]s in one second of wall-clock time.
pub const TICKS_PER_SECOND: u64 = 10_000;

/// Fixed-point timing unit used by the geometry table, the timeline and the scheduler.
///
/// One tick is `1 / TICKS_PER_SECOND` seconds. At one rotation per second a full rotation is
/// exactly `TICKS_PER_SECOND` ticks. [`Tick::as_duration`] is the only conversion to
/// wall-clock time.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct Tick(pub u64);

impl Tick {
    /// Zero ticks.
    pub const ZERO: Tick = Tick(0);

    /// Wall-clock duration of this many ticks.
    pub fn as_duration(self) -> Duration {
        let nanos_per_tick = 1_000_000_000 / TICKS_PER_SECOND;
        Duration::from_nanos(self.0.saturating_mul(nanos_per_tick))
    }

    /// Ticks in `millis` milliseconds, saturating at `u64::MAX`.
    pub fn from_millis(millis: u64) -> Tick {
        Tick(millis.saturating_mul(TICKS_PER_SECOND) / 1000)
    }

    /// `self - rhs`, clamped at zero.
    pub fn saturating_sub(self, rhs: Tick) -> Tick {
        Tick(self.0.saturating_sub(rhs.0))
    }

    /// Round a fractional tick count to the nearest tick, clamping negatives to zero.
    pub fn from_f64_rounded(ticks: f64) -> Tick {
        Tick(ticks.round().max(0.0) as u64)
    }
}

impl std::ops::Add for Tick {
    type Output = Tick;

    fn add(self, rhs: Tick) -> Tick {
        Tick(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::AddAssign for Tick {
    fn add_assign(&mut self, rhs: Tick) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for Tick {
    fn sum<I: Iterator<Item = Tick>>(iter: I) -> Tick {
        iter.fold(Tick::ZERO, |acc, t| acc + t)
    }
}

/// Straight RGB8 voxel color. Serialized as a `[r, g, b]` array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb8 {
    /// All channels off.
    pub const BLACK: Rgb8 = Rgb8 { r: 0, g: 0, b: 0 };
    /// All channels full.
    pub const WHITE: Rgb8 = Rgb8 {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Arithmetic mean of the three channels.
    pub fn brightness(self) -> f32 {
        (f32::from(self.r) + f32::from(self.g) + f32::from(self.b)) / 3.0
    }

    /// Whether the monochrome panel would light this color at all.
    pub fn is_lit(self) -> bool {
        self.brightness() > 0.0
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from(v: [u8; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Rgb8> for [u8; 3] {
    fn from(c: Rgb8) -> Self {
        [c.r, c.g, c.b]
    }
}

/// Fixed physical description of the spinning arm.
///
/// Immutable once a [`GeometryTable`](crate::GeometryTable) has been built from it; a
/// configuration change means building a new table.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhysicalConfig {
    /// Radial pixel count `N`. The scene cross-section is a `2N x 2N` grid.
    pub radial_pixels: u32,
    /// Grid step `d` used when sampling the cross-section.
    pub spacing: u32,
    /// Rotations per second.
    pub rps: f64,
}

impl PhysicalConfig {
    /// Validated arm description with the speed in revolutions per second.
    pub fn new(radial_pixels: u32, spacing: u32, rps: f64) -> VoxResult<Self> {
        let cfg = Self {
            radial_pixels,
            spacing,
            rps,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build from a rotation speed in revolutions per minute.
    pub fn from_rpm(radial_pixels: u32, spacing: u32, rpm: f64) -> VoxResult<Self> {
        if !rpm.is_finite() || rpm <= 0.0 {
            return Err(VoxError::validation(format!(
                "rpm must be finite and > 0 (got {rpm})"
            )));
        }
        Self::new(radial_pixels, spacing, rpm / 60.0)
    }

    /// Reject arms and speeds that cannot be scheduled.
    pub fn validate(&self) -> VoxResult<()> {
        if self.radial_pixels == 0 {
            return Err(VoxError::validation("radial_pixels must be > 0"));
        }
        if self.spacing == 0 {
            return Err(VoxError::validation("spacing must be > 0"));
        }
        if !self.rps.is_finite() || self.rps <= 0.0 {
            return Err(VoxError::validation(format!(
                "rotation speed must be finite and > 0 (got {} rps)",
                self.rps
            )));
        }
        if self.rotation_period().0 < 2 {
            return Err(VoxError::validation(format!(
                "rotation speed {} rps is faster than the timing resolution allows",
                self.rps
            )));
        }
        Ok(())
    }

    /// Side length of the square scene cross-section grid (`2N`).
    pub fn grid_side(&self) -> u32 {
        self.radial_pixels * 2
    }

    /// Rotation period in fractional ticks, before rounding.
    pub fn rotation_period_f64(&self) -> f64 {
        (1.0 / self.rps) * TICKS_PER_SECOND as f64
    }

    /// One full rotation, rounded to the nearest tick.
    pub fn rotation_period(&self) -> Tick {
        Tick::from_f64_rounded(self.rotation_period_f64())
    }

    /// Half a rotation: the two-sided arm reaches every angle once per sweep.
    pub fn sweep(&self) -> Tick {
        Tick::from_f64_rounded(self.rotation_period_f64() / 2.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
