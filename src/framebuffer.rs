use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::error::Fault;

/// # Framebuffer
/// The Chip-8 display is 64x32 monochrome pixels.
///
/// Pixels are stored flat and row-major, so `(x, y)` lives at `x + y * width`.
/// Callers are expected to wrap sprite coordinates themselves; anything outside
/// the grid is rejected with a `CoordinateFault`.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pixels: [bool; DISPLAY_WIDTH * DISPLAY_HEIGHT],
}

impl Framebuffer {
    pub fn new() -> Self {
        Framebuffer {
            pixels: [false; DISPLAY_WIDTH * DISPLAY_HEIGHT],
        }
    }

    pub fn width(&self) -> usize {
        DISPLAY_WIDTH
    }

    pub fn height(&self) -> usize {
        DISPLAY_HEIGHT
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, Fault> {
        if x < DISPLAY_WIDTH && y < DISPLAY_HEIGHT {
            Ok(x + y * DISPLAY_WIDTH)
        } else {
            Err(Fault::CoordinateFault { x, y })
        }
    }

    /// Returns whether the pixel at `(x, y)` is lit.
    pub fn get(&self, x: usize, y: usize) -> Result<bool, Fault> {
        let index = self.index(x, y)?;
        Ok(self.pixels[index])
    }

    pub fn set(&mut self, x: usize, y: usize, on: bool) -> Result<(), Fault> {
        let index = self.index(x, y)?;
        self.pixels[index] = on;
        Ok(())
    }

    /// XORs a lit pixel onto `(x, y)`.
    /// Returns true if the pixel was lit beforehand and has now been erased.
    pub fn flip(&mut self, x: usize, y: usize) -> Result<bool, Fault> {
        let index = self.index(x, y)?;
        let erased = self.pixels[index];
        self.pixels[index] = !erased;
        Ok(erased)
    }

    pub fn clear(&mut self) {
        self.pixels = [false; DISPLAY_WIDTH * DISPLAY_HEIGHT];
    }

    /// Every pixel as `(x, y, lit)`, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.pixels
            .iter()
            .enumerate()
            .map(|(i, &on)| (i % DISPLAY_WIDTH, i / DISPLAY_WIDTH, on))
    }

    /// The display as a sequence of rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.pixels.chunks(DISPLAY_WIDTH)
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lit = self.pixels.iter().filter(|&&on| on).count();
        f.debug_struct("Framebuffer")
            .field("width", &DISPLAY_WIDTH)
            .field("height", &DISPLAY_HEIGHT)
            .field("lit", &lit)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_blank() {
        let frame = Framebuffer::new();
        assert!(frame.pixels().all(|(_, _, on)| !on));
    }

    #[test]
    fn test_set_and_get() {
        let mut frame = Framebuffer::new();
        frame.set(3, 7, true).unwrap();
        assert_eq!(frame.get(3, 7), Ok(true));
        assert_eq!(frame.get(7, 3), Ok(false));
        frame.set(3, 7, false).unwrap();
        assert_eq!(frame.get(3, 7), Ok(false));
    }

    #[test]
    fn test_row_major_layout() {
        let mut frame = Framebuffer::new();
        frame.set(1, 2, true).unwrap();
        assert!(frame.pixels[1 + 2 * DISPLAY_WIDTH]);
        let lit: Vec<_> = frame.pixels().filter(|(_, _, on)| *on).collect();
        assert_eq!(lit, vec![(1, 2, true)]);
        assert!(frame.rows().nth(2).unwrap()[1]);
    }

    #[test]
    fn test_clear() {
        let mut frame = Framebuffer::new();
        frame.pixels = [true; DISPLAY_WIDTH * DISPLAY_HEIGHT];
        frame.clear();
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                assert_eq!(frame.get(x, y), Ok(false));
            }
        }
    }

    #[test]
    fn test_flip_reports_erased_pixels() {
        let mut frame = Framebuffer::new();
        assert_eq!(frame.flip(0, 0), Ok(false));
        assert_eq!(frame.get(0, 0), Ok(true));
        assert_eq!(frame.flip(0, 0), Ok(true));
        assert_eq!(frame.get(0, 0), Ok(false));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut frame = Framebuffer::new();
        assert_eq!(
            frame.get(DISPLAY_WIDTH, 0),
            Err(Fault::CoordinateFault { x: 64, y: 0 })
        );
        assert_eq!(
            frame.set(0, DISPLAY_HEIGHT, true),
            Err(Fault::CoordinateFault { x: 0, y: 32 })
        );
        assert!(frame.flip(100, 100).is_err());
    }
}
