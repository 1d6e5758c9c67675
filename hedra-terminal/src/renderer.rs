//! Truecolor half-block presentation of a frame's color buffer
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use hedra_core::{FrameBuffers, Rgba};
use std::io::Write;

/// Upper half block: the glyph takes the foreground color, the rest of the
/// cell the background color, so one cell shows two pixels stacked.
pub const HALF_BLOCK: char = '▀';

const DEFAULT_BACKGROUND: Rgba = Rgba::opaque(18, 18, 24);

/// Presents two buffer rows per terminal row.
pub struct HalfBlockPresenter {
    background: Rgba,
}

impl HalfBlockPresenter {
    pub fn new(background: Rgba) -> Self {
        Self { background }
    }

    /// Terminal columns and rows needed for `buffers`.
    pub fn cell_size(buffers: &FrameBuffers) -> (usize, usize) {
        (buffers.width(), buffers.height().div_ceil(2))
    }

    /// Pixel height that fills `rows` terminal rows.
    pub fn pixel_height(rows: u16) -> usize {
        rows as usize * 2
    }

    /// Upper and lower pixel of one cell. Pixels nothing was drawn on, and
    /// the missing lower row of an odd-height buffer, show the background.
    pub fn cell_colors(&self, buffers: &FrameBuffers, column: usize, row: usize) -> (Rgba, Rgba) {
        let x = column as i64;
        let y = (row * 2) as i64;
        let pick = |pixel: Option<Rgba>| match pixel {
            Some(color) if !color.is_transparent() => color,
            _ => self.background,
        };
        (pick(buffers.color_at(x, y)), pick(buffers.color_at(x, y + 1)))
    }

    pub fn draw<W: Write>(&self, buffers: &FrameBuffers, writer: &mut W) -> std::io::Result<()> {
        let (columns, rows) = Self::cell_size(buffers);
        let mut current: Option<(Rgba, Rgba)> = None;

        for row in 0..rows {
            writer.queue(cursor::MoveTo(0, row as u16))?;
            for column in 0..columns {
                let (upper, lower) = self.cell_colors(buffers, column, row);
                if current != Some((upper, lower)) {
                    writer.queue(SetForegroundColor(to_color(upper)))?;
                    writer.queue(SetBackgroundColor(to_color(lower)))?;
                    current = Some((upper, lower));
                }
                writer.queue(Print(HALF_BLOCK))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Default for HalfBlockPresenter {
    fn default() -> Self {
        Self::new(DEFAULT_BACKGROUND)
    }
}

fn to_color(color: Rgba) -> Color {
    Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_pair_rows() {
        let mut buffers = FrameBuffers::new(2, 3);
        let red = Rgba::opaque(255, 0, 0);
        let blue = Rgba::opaque(0, 0, 255);
        buffers.set_pixel(1, 0, 1.0, red);
        buffers.set_pixel(1, 1, 1.0, blue);
        buffers.set_pixel(0, 2, 1.0, blue);

        let presenter = HalfBlockPresenter::default();
        assert_eq!(HalfBlockPresenter::cell_size(&buffers), (2, 2));
        assert_eq!(presenter.cell_colors(&buffers, 1, 0), (red, blue));
        assert_eq!(
            presenter.cell_colors(&buffers, 0, 0),
            (DEFAULT_BACKGROUND, DEFAULT_BACKGROUND)
        );
        // Odd height: the last row has no lower pixel.
        assert_eq!(presenter.cell_colors(&buffers, 0, 1), (blue, DEFAULT_BACKGROUND));
    }

    #[test]
    fn test_draw_prints_one_glyph_per_cell() {
        let buffers = FrameBuffers::new(3, 4);
        let mut out = Vec::new();
        HalfBlockPresenter::default()
            .draw(&buffers, &mut out)
            .expect("write to memory");
        let text = String::from_utf8(out).expect("utf-8");
        assert_eq!(text.matches(HALF_BLOCK).count(), 6);
    }
}
