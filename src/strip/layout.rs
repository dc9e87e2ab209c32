use crate::error::{DecodeError, Result};
use crate::raster::RectF;

/// Geometry of the photo strip. Always three slots stacked vertically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripLayout {
    pub width: u32,
    pub slot_height: u32,
    pub border: u32,
}

/// Where one photo goes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotPlacement {
    pub ordinal: usize,
    /// The full slot, painted white and outlined
    pub slot: RectF,
    /// The scaled photo, aspect ratio preserved and centered in the slot
    pub draw: RectF,
}

impl StripLayout {
    pub const SLOT_COUNT: usize = 3;

    /// The standard booth strip: 600 wide, 400-tall slots, 5 unit borders
    pub const STANDARD: StripLayout = StripLayout {
        width: 600,
        slot_height: 400,
        border: 5,
    };

    /// Three slots plus a border above, between and below them
    pub const fn height(&self) -> u32 {
        self.slot_height * Self::SLOT_COUNT as u32 + self.border * (Self::SLOT_COUNT as u32 + 1)
    }

    /// Top edge of slot `ordinal`
    pub fn slot_top(&self, ordinal: usize) -> f64 {
        (self.border + ordinal as u32 * (self.slot_height + self.border)) as f64
    }

    /// Rectangle reserved for slot `ordinal`
    pub fn slot_rect(&self, ordinal: usize) -> RectF {
        RectF::new(
            self.border as f64,
            self.slot_top(ordinal),
            (self.width - 2 * self.border) as f64,
            self.slot_height as f64,
        )
    }

    /// Fit a `src_width` x `src_height` photo inside slot `ordinal`.
    ///
    /// The photo is scaled to the slot's inner width; if that makes it too
    /// tall it is scaled to the slot height instead. Never cropped.
    pub fn place(&self, ordinal: usize, src_width: u32, src_height: u32) -> Result<SlotPlacement> {
        if src_width == 0 || src_height == 0 {
            return Err(DecodeError::EmptyImage {
                width: src_width,
                height: src_height,
            }
            .into());
        }

        let aspect = src_width as f64 / src_height as f64;
        let slot_height = self.slot_height as f64;

        let mut draw_width = (self.width - 2 * self.border) as f64;
        let mut draw_height = draw_width / aspect;
        if draw_height > slot_height {
            draw_height = slot_height;
            draw_width = draw_height * aspect;
        }

        let slot = self.slot_rect(ordinal);
        let x = (self.width as f64 - draw_width) / 2.0;
        let y = slot.y + (slot_height - draw_height) / 2.0;

        Ok(SlotPlacement {
            ordinal,
            slot,
            draw: RectF::new(x, y, draw_width, draw_height),
        })
    }
}

impl Default for StripLayout {
    fn default() -> Self {
        Self::STANDARD
    }
}
