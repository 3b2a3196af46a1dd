use std::collections::BTreeMap;
use std::f64::consts::{PI, TAU};

use crate::foundation::core::{PANEL_WIDTH, PhysicalConfig, Tick};

/// Which end of the spinning arm lights a pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Side {
    /// The end that points along the sampled angle.
    Near,
    /// The opposite end, half a turn behind.
    Far,
}

impl Side {
    /// The other end of the arm.
    pub fn flipped(self) -> Side {
        match self {
            Side::Near => Side::Far,
            Side::Far => Side::Near,
        }
    }
}

/// One LED on the arm: which end, and how far from the rotation center.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ArmPixel {
    /// Which end of the arm.
    pub side: Side,
    /// Distance from the rotation center, in pixels.
    pub radius: u32,
}

impl ArmPixel {
    /// Signed radial index: positive on the near end, negative on the far end.
    pub fn signed(self) -> i64 {
        match self.side {
            Side::Near => i64::from(self.radius),
            Side::Far => -i64::from(self.radius),
        }
    }
}

/// "At this offset, light `pixel` to show cross-section cell (`column`, `row`)."
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ActivationRule {
    /// The LED that fires.
    pub pixel: ArmPixel,
    /// Column in the `2N x 2N` cross-section grid.
    pub column: u32,
    /// Row in the `2N x 2N` cross-section grid.
    pub row: u32,
}

/// Precomputed mapping from timing offset to the cross-section cells visible at that offset.
///
/// Built exactly once per [`PhysicalConfig`] and read-only afterwards, so it can be shared by
/// reference between any number of timeline compilations.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryTable {
    config: PhysicalConfig,
    entries: BTreeMap<Tick, Vec<ActivationRule>>,
}

impl GeometryTable {
    /// Sample the `2N x 2N` cross-section at grid step `d` and bucket every sample by the offset
    /// at which the arm passes over it.
    ///
    /// The builder is pure: the same config always yields the same table.
    #[tracing::instrument]
    pub fn build(config: &PhysicalConfig) -> GeometryTable {
        let n = i64::from(config.radial_pixels);
        let step = config.spacing as usize;
        let period = config.rotation_period_f64();

        let mut entries: BTreeMap<Tick, Vec<ActivationRule>> = BTreeMap::new();
        for a in (-n..n).step_by(step) {
            for b in (-n..n).step_by(step) {
                let (offset, pixel) = locate(a, b, period);
                entries.entry(offset).or_default().push(ActivationRule {
                    pixel,
                    column: (a + n) as u32,
                    row: (b + n) as u32,
                });
            }
        }

        let table = GeometryTable {
            config: *config,
            entries,
        };
        tracing::info!(
            offsets = table.len(),
            rules = table.rule_count(),
            sweep_ticks = table.sweep().0,
            "built geometry table"
        );
        table
    }

    /// The configuration this table was built from.
    pub fn config(&self) -> &PhysicalConfig {
        &self.config
    }

    /// Full rotation period in ticks.
    pub fn rotation_period(&self) -> Tick {
        self.config.rotation_period()
    }

    /// Half a rotation; every offset in the table falls inside one sweep.
    pub fn sweep(&self) -> Tick {
        self.config.sweep()
    }

    /// Number of distinct offsets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` for a table with no offsets.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of rules across all offsets.
    pub fn rule_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Rules lit at exactly `offset`.
    pub fn rules_at(&self, offset: Tick) -> &[ActivationRule] {
        self.entries.get(&offset).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Offsets in increasing order with their rules.
    pub fn iter(&self) -> impl Iterator<Item = (Tick, &[ActivationRule])> {
        self.entries.iter().map(|(k, v)| (*k, v.as_slice()))
    }
}

/// Polar reconciliation of one cross-section sample `(a, b)` relative to the rotation center.
fn locate(a: i64, b: i64, period: f64) -> (Tick, ArmPixel) {
    let (af, bf) = (a as f64, b as f64);
    let radius = (af * af + bf * bf).sqrt().round().clamp(0.0, PANEL_WIDTH as f64) as u32;

    let mut angle = bf.atan2(af);
    if angle < 0.0 {
        angle += TAU;
    }

    let mut side = Side::Near;
    let bottom = if b != 0 { b < 0 } else { a < 0 };
    if bottom {
        angle -= PI;
        side = side.flipped();
    }

    let mut offset = period * angle / TAU;
    if angle > PI {
        side = side.flipped();
        offset -= period / 2.0;
    }

    (Tick::from_f64_rounded(offset), ArmPixel { side, radius })
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/table.rs"]
mod tests;
