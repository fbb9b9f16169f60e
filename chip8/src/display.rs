use std::io::Write;

use log::warn;

use chip8_vm::{FrameSink, Framebuffer};

const ON: char = '█';
const OFF: char = ' ';

/// # Display
/// Renders the 64x32 Chip-8 frame as text, one line per row.
/// Only gets a call to `render` when the Chip-8 FrameBuffer is updated.
pub struct AsciiDisplay<W: Write> {
    out: W,
    /// Redraw in place instead of scrolling
    clear: bool,
}

impl<W: Write> AsciiDisplay<W> {
    /// # Arguments
    /// * `out` where frames are written
    /// * `clear` whether to home the cursor and clear the terminal before each frame
    pub fn new(out: W, clear: bool) -> Self {
        AsciiDisplay { out, clear }
    }

    /// Formats a Chip-8 FrameBuffer as text.
    ///
    /// Each row of the frame becomes a line, with lit pixels drawn as a full block
    /// and unlit ones as spaces.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    fn frame_to_ascii(frame: &Framebuffer) -> String {
        frame
            .rows()
            .flat_map(|row| {
                row.iter()
                    .map(|&on| if on { ON } else { OFF })
                    .chain(std::iter::once('\n'))
            })
            .collect()
    }

    fn write_frame(&mut self, frame: &Framebuffer) -> std::io::Result<()> {
        if self.clear {
            write!(self.out, "\x1B[2J\x1B[H")?;
        }
        self.out.write_all(Self::frame_to_ascii(frame).as_bytes())?;
        self.out.flush()
    }
}

impl<W: Write> FrameSink for AsciiDisplay<W> {
    fn render(&mut self, frame: &Framebuffer) {
        if let Err(e) = self.write_frame(frame) {
            warn!("failed to render frame: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_to_ascii() {
        let mut frame = Framebuffer::new();
        frame.set(1, 0, true).unwrap();
        frame.set(0, 1, true).unwrap();
        let text = AsciiDisplay::<Vec<u8>>::frame_to_ascii(&frame);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 32);
        assert!(lines.iter().all(|line| line.chars().count() == 64));
        assert!(lines[0].starts_with(" █ "));
        assert!(lines[1].starts_with("█ "));
        assert!(lines[2].chars().all(|c| c == ' '));
    }

    #[test]
    fn test_render_writes_frame() {
        let mut display = AsciiDisplay::new(Vec::new(), false);
        display.render(&Framebuffer::new());
        let text = String::from_utf8(display.out).unwrap();
        assert_eq!(text.len(), 32 * 65);
    }

    #[test]
    fn test_render_clears_first() {
        let mut display = AsciiDisplay::new(Vec::new(), true);
        display.render(&Framebuffer::new());
        assert!(display.out.starts_with(b"\x1B[2J\x1B[H"));
    }
}
