//! The patch: the unit of spatial streaming between simulator and viewer.

use glam::IVec2;

use crate::config::Rgb;
use crate::sim::Direction;

/// Square per-cell 3-channel intensity field.
///
/// Storage is row-major with `cells[y * extent + x]`, x rightward and y
/// upward. Intensities are non-negative and unbounded above; they are
/// display signals, not colors. One type serves patch scent, the auxiliary
/// per-patch vision layers, and agent vision buffers, so the two panels
/// cannot drift apart in layout.
#[derive(Debug, Clone, PartialEq)]
pub struct CellField {
    extent: usize,
    cells: Vec<Rgb>,
}

impl CellField {
    /// An all-zero field of `extent` cells per edge.
    pub fn zeroed(extent: usize) -> Self {
        Self {
            extent,
            cells: vec![[0.0; 3]; extent * extent],
        }
    }

    /// Wrap an existing cell buffer. `cells.len()` must equal `extent²`.
    pub fn from_cells(extent: usize, cells: Vec<Rgb>) -> Self {
        assert_eq!(
            cells.len(),
            extent * extent,
            "cell buffer length does not match field extent"
        );
        Self { extent, cells }
    }

    /// Cells per edge.
    pub fn extent(&self) -> usize {
        self.extent
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.cells[y * self.extent + x]
    }

    /// Accumulate an intensity contribution onto one cell.
    pub fn add(&mut self, x: usize, y: usize, value: Rgb) {
        let cell = &mut self.cells[y * self.extent + x];
        for (acc, v) in cell.iter_mut().zip(value.iter()) {
            *acc += v;
        }
    }

    /// Raw cell buffer, row-major by y.
    pub fn cells(&self) -> &[Rgb] {
        &self.cells
    }
}

/// One item instance inside a patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemInstance {
    /// Index into [`SimulatorConfig::items`](crate::config::SimulatorConfig).
    pub item_type: usize,
    /// Absolute cell position.
    pub position: IVec2,
}

/// One agent inside a patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentPose {
    /// Absolute cell position.
    pub position: IVec2,
    pub facing: Direction,
}

/// A fixed-size square tile of the world grid.
///
/// Patches are ephemeral: fetched fresh from the simulator on every draw,
/// never cached across frames and never mutated by the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    /// Position in patch units (not cells).
    pub position: IVec2,
    /// A fixed patch's content will never change again. Rendered with
    /// reduced grid emphasis; nothing else differs.
    pub fixed: bool,
    /// Scent intensities, extent = patch size.
    pub scent: CellField,
    /// Auxiliary per-cell layer; not rendered by the world panel.
    pub vision: CellField,
    /// Auxiliary per-cell layer; not rendered by the world panel.
    pub gt_vision: CellField,
    pub items: Vec<ItemInstance>,
    pub agents: Vec<AgentPose>,
}

impl Patch {
    /// Lower-left cell of this patch, in absolute cell coordinates.
    pub fn origin_cell(&self, patch_size: u32) -> IVec2 {
        self.position * patch_size as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_field_accumulates() {
        let mut field = CellField::zeroed(4);
        field.add(1, 2, [0.5, 0.0, 1.0]);
        field.add(1, 2, [0.25, 1.0, 0.0]);
        assert_eq!(field.get(1, 2), [0.75, 1.0, 1.0]);
        assert_eq!(field.get(2, 1), [0.0, 0.0, 0.0]);
    }

    #[test]
    #[should_panic(expected = "does not match field extent")]
    fn test_cell_field_rejects_mismatched_buffer() {
        CellField::from_cells(3, vec![[0.0; 3]; 8]);
    }

    #[test]
    fn test_patch_origin_cell() {
        let patch = Patch {
            position: IVec2::new(-2, 3),
            fixed: false,
            scent: CellField::zeroed(1),
            vision: CellField::zeroed(1),
            gt_vision: CellField::zeroed(1),
            items: Vec::new(),
            agents: Vec::new(),
        };
        assert_eq!(patch.origin_cell(32), IVec2::new(-64, 96));
    }
}
