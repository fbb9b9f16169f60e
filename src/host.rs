//! Capabilities the host supplies to the machine.

use std::io::{self, Read};

use crate::constants::KEY_COUNT;
use crate::framebuffer::Framebuffer;

/// Something that can show a frame, e.g. a window or a terminal.
/// It only gets a call to `render` when the Chip-8 framebuffer has changed.
pub trait FrameSink {
    fn render(&mut self, frame: &Framebuffer);
}

/// The state of the 16 key hexadecimal keypad, polled by the key instructions.
pub trait InputSource {
    /// Keys outside 0..=F are never pressed.
    fn is_pressed(&self, key: u8) -> bool;

    /// The lowest numbered key that is currently down.
    fn first_pressed(&self) -> Option<u8> {
        (0..KEY_COUNT as u8).find(|&key| self.is_pressed(key))
    }
}

/// A ROM to be copied into memory once.
pub trait RomSource {
    fn read_rom(&mut self) -> io::Result<Vec<u8>>;
}

impl<R: Read> RomSource for R {
    fn read_rom(&mut self) -> io::Result<Vec<u8>> {
        let mut rom = Vec::new();
        self.read_to_end(&mut rom)?;
        Ok(rom)
    }
}

impl InputSource for [bool; KEY_COUNT] {
    fn is_pressed(&self, key: u8) -> bool {
        self.get(key as usize).copied().unwrap_or(false)
    }
}

/// No keys are ever pressed.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn is_pressed(&self, _key: u8) -> bool {
        false
    }
}

/// # Keypad
/// Tracks the pressed status of keys 0..F as the host sees key events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Keypad {
    pressed_keys: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pressed status of key; keys outside 0..=F are ignored
    pub fn key_press(&mut self, key: u8) {
        if let Some(pressed) = self.pressed_keys.get_mut(key as usize) {
            *pressed = true;
        }
    }

    /// Unset the pressed status of key
    pub fn key_release(&mut self, key: u8) {
        if let Some(pressed) = self.pressed_keys.get_mut(key as usize) {
            *pressed = false;
        }
    }

    pub fn release_all(&mut self) {
        self.pressed_keys = [false; KEY_COUNT];
    }
}

impl InputSource for Keypad {
    fn is_pressed(&self, key: u8) -> bool {
        self.pressed_keys.is_pressed(key)
    }
}
