use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{PANEL_HEIGHT, Rgb8};
use crate::foundation::error::{VoxError, VoxResult};

/// A static voxel scene indexed `[column][layer][row]`.
///
/// `layer` is the vertical axis and maps directly to a panel row; `(column, row)` address the
/// horizontal cross-section swept by the arm. Each cell is either empty or an RGB color.
///
/// On disk a scene is the same nested array in JSON, with `null` for empty cells:
///
/// ```json
/// [[[null, [255, 255, 255]], [null, null]], [[null, null], [null, null]]]
/// ```
///
/// Inner arrays may be ragged. Missing cells read as empty; the compiler degrades to a
/// partially lit image rather than rejecting the scene.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Scene {
    cells: Vec<Vec<Vec<Option<Rgb8>>>>,
}

impl Scene {
    /// An empty `columns x layers x rows` scene.
    pub fn new(columns: usize, layers: usize, rows: usize) -> Self {
        Self {
            cells: vec![vec![vec![None; rows]; layers]; columns],
        }
    }

    /// Wrap an already nested `[column][layer][row]` array.
    pub fn from_cells(cells: Vec<Vec<Vec<Option<Rgb8>>>>) -> Self {
        Self { cells }
    }

    /// The built-in demo: a white slab filling every cell with `row >= 32`, on every layer.
    ///
    /// With the default 24-pixel arm the cross-section is 48 rows deep, so the slab covers
    /// the back third of the volume.
    pub fn demo(radial_pixels: u32, layers: usize) -> Self {
        let side = radial_pixels as usize * 2;
        let mut scene = Self::new(side, layers, side);
        for column in 0..side {
            for layer in 0..layers {
                for row in 32..side {
                    scene.set(column, layer, row, Some(Rgb8::WHITE));
                }
            }
        }
        scene
    }

    /// Parse a scene from nested JSON arrays.
    pub fn from_json_str(s: &str) -> VoxResult<Self> {
        serde_json::from_str(s).map_err(|e| VoxError::serde(format!("scene JSON: {e}")))
    }

    /// Read a scene JSON file.
    pub fn from_path(path: &Path) -> VoxResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read scene '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Serialize back to the nested array form.
    pub fn to_json_string(&self) -> VoxResult<String> {
        serde_json::to_string(self).map_err(|e| VoxError::serde(format!("scene JSON: {e}")))
    }

    /// Number of columns (outermost dimension).
    pub fn columns(&self) -> usize {
        self.cells.len()
    }

    /// Number of layers, taken from the first column as the loader expects a uniform height.
    pub fn layers(&self) -> usize {
        self.cells.first().map(Vec::len).unwrap_or(0)
    }

    /// Cell color, or `None` for empty and missing cells.
    pub fn get(&self, column: usize, layer: usize, row: usize) -> Option<Rgb8> {
        self.cells
            .get(column)
            .and_then(|c| c.get(layer))
            .and_then(|l| l.get(row))
            .copied()
            .flatten()
    }

    /// Set one cell. Writes outside the allocated dimensions are ignored.
    pub fn set(&mut self, column: usize, layer: usize, row: usize, color: Option<Rgb8>) {
        if let Some(cell) = self
            .cells
            .get_mut(column)
            .and_then(|c| c.get_mut(layer))
            .and_then(|l| l.get_mut(row))
        {
            *cell = color;
        }
    }

    /// Every non-empty cell on `layer` as `((column, row), color)`.
    pub fn layer_cells(&self, layer: usize) -> impl Iterator<Item = ((usize, usize), Rgb8)> + '_ {
        self.cells.iter().enumerate().flat_map(move |(column, c)| {
            c.get(layer)
                .into_iter()
                .flat_map(|l| l.iter().enumerate())
                .filter_map(move |(row, cell)| cell.map(|color| ((column, row), color)))
        })
    }

    /// `true` when no cell is lit.
    pub fn is_empty(&self) -> bool {
        (0..self.layers()).all(|y| self.layer_cells(y).next().is_none())
    }

    /// Describe how this scene deviates from a `grid_side x grid_side` cross-section with at
    /// most one layer per panel row. `None` when it fits exactly.
    pub fn shape_mismatch(&self, grid_side: usize) -> Option<String> {
        let mut problems = Vec::new();
        if self.columns() != grid_side {
            problems.push(format!("{} columns, expected {grid_side}", self.columns()));
        }
        if self.layers() > PANEL_HEIGHT {
            problems.push(format!(
                "{} layers, panel shows {PANEL_HEIGHT}",
                self.layers()
            ));
        }
        let ragged = self.cells.iter().any(|c| {
            c.len() != self.layers() || c.iter().any(|l| l.len() != grid_side)
        });
        if ragged {
            problems.push(format!("rows not uniformly {grid_side} long"));
        }
        (!problems.is_empty()).then(|| problems.join(", "))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
