/// Bytes of addressable memory.
pub const MEMORY_SIZE: usize = 4096;

/// ROMs are copied into memory starting here; everything below is reserved for the interpreter.
pub const PROGRAM_START: u16 = 0x200;

/// The largest ROM that fits between `PROGRAM_START` and the end of memory.
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Slots in the call stack. Slot 0 is never written since `sp == 0` marks an empty stack.
pub const STACK_SIZE: usize = 16;

pub const REGISTER_COUNT: usize = 16;

/// VF doubles as the carry, borrow and collision flag.
pub const FLAG_REGISTER: usize = 0xF;

pub const KEY_COUNT: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Where the sprite sheet starts in memory.
pub const FONT_ADDRESS: u16 = 0x000;

/// Each hexadecimal glyph is 5 bytes (rows) tall.
pub const GLYPH_SIZE: u16 = 5;

/// Default CPU clock speed in Hz.
pub const CLOCK_SPEED: u32 = 500;

/// The delay and sound timers always count down at 60Hz.
pub const TIMER_SPEED: u32 = 60;

/// # Sprite sheet
/// The glyphs for 0..F, drawn 4 pixels wide with the low nibble of each row unused.
///
/// ```text
/// 0xF0  ****
/// 0x90  *  *
/// 0x90  *  *
/// 0x90  *  *
/// 0xF0  ****
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
