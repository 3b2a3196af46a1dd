use std::collections::{BTreeMap, HashMap};

use crate::{
    foundation::core::{PANEL_WIDTH, Rgb8, Tick},
    foundation::error::{VoxError, VoxResult},
    geometry::table::{ArmPixel, GeometryTable, Side},
    render::raster::PanelActivation,
    scene::model::Scene,
};

/// One LED flash: which arm pixel, on which layer (panel row), with which color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Activation {
    /// The LED that fires.
    pub pixel: ArmPixel,
    /// Scene layer, shown on the panel row of the same index.
    pub layer: u32,
    /// Color of the scene cell.
    pub color: Rgb8,
}

impl Activation {
    /// Translate to panel coordinates.
    ///
    /// The near end of the arm counts columns up from the left edge; the far end counts them
    /// down from the right edge.
    pub fn to_panel(self) -> PanelActivation {
        let radius = i32::try_from(self.pixel.radius).unwrap_or(i32::MAX);
        let x = match self.pixel.side {
            Side::Near => radius,
            Side::Far => PANEL_WIDTH as i32 - 1 - radius,
        };
        PanelActivation {
            x,
            y: i32::try_from(self.layer).unwrap_or(i32::MAX),
            color: self.color,
        }
    }
}

/// Everything lit at one offset, and how long to wait before the next frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    /// Position within the sweep.
    pub offset: Tick,
    /// Flashes at this offset.
    pub activations: Vec<Activation>,
    /// Difference to the previous frame's offset (the raw offset for the first frame).
    pub delay: Tick,
}

impl Frame {
    /// Activations in panel coordinates, ready for [`crate::rasterize`].
    pub fn panel_activations(&self) -> Vec<PanelActivation> {
        self.activations.iter().map(|a| a.to_panel()).collect()
    }
}

/// Summary numbers for logging and the `compile` command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct TimelineStats {
    /// Number of frames.
    pub frames: usize,
    /// Total flashes over all frames.
    pub activations: usize,
    /// Offset of the last frame.
    pub span: Tick,
    /// Largest frame delay.
    pub max_delay: Tick,
    /// Length of one pass.
    pub sweep: Tick,
}

/// Ordered, sweep-spanning schedule compiled from a [`Scene`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    frames: Vec<Frame>,
    sweep: Tick,
}

impl Timeline {
    /// Build from frames already sorted by offset. Delays are recomputed from the offsets.
    pub fn from_frames(mut frames: Vec<Frame>, sweep: Tick) -> VoxResult<Self> {
        if frames.windows(2).any(|w| w[0].offset >= w[1].offset) {
            return Err(VoxError::validation(
                "timeline frames must have strictly increasing offsets",
            ));
        }
        if frames.last().is_some_and(|f| f.offset > sweep) {
            return Err(VoxError::validation("timeline frame offset exceeds sweep"));
        }
        let mut prev = Tick::ZERO;
        for f in &mut frames {
            f.delay = f.offset.saturating_sub(prev);
            prev = f.offset;
        }
        Ok(Self { frames, sweep })
    }

    /// Frames in offset order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// `true` when the scene lit nothing.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Half a rotation: the length of one playback pass.
    pub fn sweep(&self) -> Tick {
        self.sweep
    }

    /// Wait after the last frame's delay that closes the pass at exactly one sweep.
    pub fn tail(&self) -> Tick {
        let last = self.frames.last().map(|f| f.offset).unwrap_or(Tick::ZERO);
        self.sweep.saturating_sub(last)
    }

    /// Sum of frame delays plus the tail; equals [`Self::sweep`] for any non-empty timeline.
    pub fn pass_ticks(&self) -> Tick {
        self.frames.iter().map(|f| f.delay).sum::<Tick>() + self.tail()
    }

    /// Largest single frame delay.
    pub fn max_delay(&self) -> Tick {
        self.frames.iter().map(|f| f.delay).max().unwrap_or(Tick::ZERO)
    }

    /// Summary for logging and the `compile` command.
    pub fn stats(&self) -> TimelineStats {
        TimelineStats {
            frames: self.frames.len(),
            activations: self.frames.iter().map(|f| f.activations.len()).sum(),
            span: self.frames.last().map(|f| f.offset).unwrap_or(Tick::ZERO),
            max_delay: self.max_delay(),
            sweep: self.sweep,
        }
    }

    /// Pretty JSON export of the frames and sweep.
    pub fn to_json_string(&self) -> VoxResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| VoxError::serde(format!("timeline JSON: {e}")))
    }
}

/// Compile a scene against a geometry table into a [`Timeline`].
///
/// Per layer, every table rule whose `(column, row)` cell is lit in that layer contributes an
/// [`Activation`] under the rule's offset. Offsets collecting nothing emit no frame, so an
/// empty scene compiles to an empty timeline. Cells the table never samples (outside the
/// `2N` grid, off-step, or in ragged rows) are simply never matched.
#[tracing::instrument(skip(scene, table), fields(layers = scene.layers(), columns = scene.columns()))]
pub fn compile_timeline(scene: &Scene, table: &GeometryTable) -> Timeline {
    let grid_side = table.config().grid_side() as usize;
    if let Some(mismatch) = scene.shape_mismatch(grid_side) {
        tracing::warn!(%mismatch, "scene does not match the configured cross-section");
    }

    let mut master: BTreeMap<Tick, Vec<Activation>> = BTreeMap::new();
    for layer in 0..scene.layers() {
        let lit: HashMap<(usize, usize), Rgb8> = scene.layer_cells(layer).collect();
        if lit.is_empty() {
            continue;
        }
        let layer = layer as u32;
        for (offset, rules) in table.iter() {
            for rule in rules {
                let key = (rule.column as usize, rule.row as usize);
                if let Some(&color) = lit.get(&key) {
                    master.entry(offset).or_default().push(Activation {
                        pixel: rule.pixel,
                        layer,
                        color,
                    });
                }
            }
        }
    }

    let mut frames = Vec::with_capacity(master.len());
    let mut prev = Tick::ZERO;
    for (offset, activations) in master {
        frames.push(Frame {
            offset,
            activations,
            delay: offset.saturating_sub(prev),
        });
        prev = offset;
    }

    let timeline = Timeline {
        frames,
        sweep: table.sweep(),
    };
    let stats = timeline.stats();
    tracing::info!(
        frames = stats.frames,
        activations = stats.activations,
        span_ticks = stats.span.0,
        "compiled timeline"
    );
    timeline
}

#[cfg(test)]
#[path = "../../tests/unit/compile/timeline.rs"]
mod tests;
