//! SpriteSheet: a picture divided into equally sized cells, one visible
//! at a time

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use vitrine_core::types::{Point, Rect, Size};
use vitrine_core::Result;
use vitrine_renderer::{DrawTarget, Drawable, RenderStates, Texture};

use crate::picture::Picture;
use crate::widget::{save_state, Widget, WidgetBase};

/// A picture whose texture is a grid of `rows` x `columns` cells; only the
/// selected cell is shown. Rows and columns are 0-indexed.
pub struct SpriteSheet {
    picture: Picture,
    rows: u32,
    columns: u32,
    visible_cell: (u32, u32),
}

#[derive(Serialize, Deserialize)]
struct SpriteSheetState {
    position: Point,
    rows: u32,
    columns: u32,
    visible_cell: (u32, u32),
    visible: bool,
}

impl SpriteSheet {
    /// Create a sheet with a single cell covering the whole texture.
    pub fn new(texture: Arc<Texture>) -> Self {
        let mut sheet = Self {
            picture: Picture::new(texture),
            rows: 1,
            columns: 1,
            visible_cell: (0, 0),
        };
        sheet.update_cell_rect();
        sheet
    }

    pub fn set_position(&mut self, position: Point) {
        self.picture.set_position(position);
    }

    /// Display size of the visible cell.
    pub fn set_size(&mut self, size: Size) {
        self.picture.set_size(size);
    }

    /// Change the grid. The visible cell is clamped into the new grid and
    /// the displayed size becomes the natural cell size.
    pub fn set_cells(&mut self, rows: u32, columns: u32) {
        self.rows = rows.max(1);
        self.columns = columns.max(1);
        self.visible_cell = (
            self.visible_cell.0.min(self.rows - 1),
            self.visible_cell.1.min(self.columns - 1),
        );
        self.update_cell_rect();
        self.picture.set_size(self.cell_size());
    }

    pub fn set_rows(&mut self, rows: u32) {
        self.set_cells(rows, self.columns);
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn set_columns(&mut self, columns: u32) {
        self.set_cells(self.rows, columns);
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Choose which cell is displayed; out-of-range cells clamp to the
    /// last row/column.
    pub fn set_visible_cell(&mut self, row: u32, column: u32) {
        self.visible_cell = (row.min(self.rows - 1), column.min(self.columns - 1));
        self.update_cell_rect();
    }

    pub fn visible_cell(&self) -> (u32, u32) {
        self.visible_cell
    }

    /// Natural (unscaled) size of one cell in texels.
    pub fn cell_size(&self) -> Size {
        let (w, h) = self.picture.sprite().texture().size();
        Size::new(w as f32 / self.columns as f32, h as f32 / self.rows as f32)
    }

    fn update_cell_rect(&mut self) {
        let cell = self.cell_size();
        let (row, column) = self.visible_cell;
        self.picture.sprite_mut().set_texture_rect(Rect::new(
            column as f32 * cell.width,
            row as f32 * cell.height,
            cell.width,
            cell.height,
        ));
    }
}

impl Drawable for SpriteSheet {
    fn is_visible(&self) -> bool {
        self.picture.is_visible()
    }

    fn draw(&self, target: &mut dyn DrawTarget, states: &RenderStates) {
        self.picture.draw(target, states);
    }
}

impl Widget for SpriteSheet {
    fn base(&self) -> &WidgetBase {
        self.picture.base()
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        self.picture.base_mut()
    }

    fn size(&self) -> Size {
        self.picture.size()
    }

    fn type_name(&self) -> &'static str {
        "SpriteSheet"
    }

    fn save(&self) -> Result<String> {
        save_state(&SpriteSheetState {
            position: self.base().position(),
            rows: self.rows,
            columns: self.columns,
            visible_cell: self.visible_cell,
            visible: self.base().visible(),
        })
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
