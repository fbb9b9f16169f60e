use crate::constants::{
    FLAG_REGISTER, FONT_ADDRESS, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT, SPRITE_SHEET,
    STACK_SIZE,
};
use crate::error::Fault;
use crate::framebuffer::Framebuffer;

/// The Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is also the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) an 8-bit stack pointer, 0 when no subroutine is active
///
/// Timers
/// - 2 8-bit timers (delay & sound) counting down to 0 at 60Hz
///
/// ## Memory
/// - 16 slot stack of return addresses
/// - 4096 bytes of addressable memory
///     - 0x000..0x050 holds the sprite sheet
///     - 0x200.. holds the ROM
/// - 64x32 frame buffer and a flag marking it as changed
///
/// Every accessor is bounds checked and reports an `AddressFault` instead of panicking.
#[derive(Clone, Debug)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_SIZE],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: Framebuffer,
    pub draw_flag: bool,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font = FONT_ADDRESS as usize;
        memory[font..font + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_SIZE],
            memory,
            frame_buffer: Framebuffer::new(),
            draw_flag: false,
        }
    }

    /// Checks that `len` bytes starting at `address` are all addressable.
    pub fn check_range(&self, address: usize, len: usize) -> Result<(), Fault> {
        match address.checked_add(len) {
            Some(end) if end <= MEMORY_SIZE => Ok(()),
            // Report the first byte that falls outside memory
            _ => Err(Fault::AddressFault {
                address: address.max(MEMORY_SIZE),
            }),
        }
    }

    pub fn read_byte(&self, address: usize) -> Result<u8, Fault> {
        self.memory
            .get(address)
            .copied()
            .ok_or(Fault::AddressFault { address })
    }

    pub fn write_byte(&mut self, address: usize, value: u8) -> Result<(), Fault> {
        let cell = self
            .memory
            .get_mut(address)
            .ok_or(Fault::AddressFault { address })?;
        *cell = value;
        Ok(())
    }

    pub fn read_bytes(&self, address: usize, len: usize) -> Result<&[u8], Fault> {
        self.check_range(address, len)?;
        Ok(&self.memory[address..address + len])
    }

    /// Copies `data` into memory at `address`; nothing is written if any byte would fall outside.
    pub fn write_bytes(&mut self, address: usize, data: &[u8]) -> Result<(), Fault> {
        self.check_range(address, data.len())?;
        self.memory[address..address + data.len()].copy_from_slice(data);
        Ok(())
    }

    /// Reads the big-endian 16-bit word at `address`.
    pub fn read_word(&self, address: usize) -> Result<u16, Fault> {
        let bytes = self.read_bytes(address, 2)?;
        Ok(u16::from(bytes[0]) << 8 | u16::from(bytes[1]))
    }

    pub fn register(&self, index: u8) -> Result<u8, Fault> {
        self.v
            .get(index as usize)
            .copied()
            .ok_or(Fault::AddressFault {
                address: index as usize,
            })
    }

    pub fn set_register(&mut self, index: u8, value: u8) -> Result<(), Fault> {
        let register = self.v.get_mut(index as usize).ok_or(Fault::AddressFault {
            address: index as usize,
        })?;
        *register = value;
        Ok(())
    }

    /// Writes VF. Flag-producing operations call this last so the flag wins when Vx is VF.
    pub fn set_flag(&mut self, set: bool) {
        self.v[FLAG_REGISTER] = set as u8;
    }

    /// Pushes a return address.
    /// `sp` is incremented before the write so slot 0 is never used.
    pub fn push(&mut self, address: u16) -> Result<(), Fault> {
        let sp = self.sp as usize + 1;
        if sp >= STACK_SIZE {
            return Err(Fault::StackOverflow);
        }
        self.stack[sp] = address;
        self.sp = sp as u8;
        Ok(())
    }

    /// Pops the most recent return address.
    pub fn pop(&mut self) -> Result<u16, Fault> {
        if self.sp == 0 {
            return Err(Fault::StackUnderflow);
        }
        let address = self.stack[self.sp as usize];
        self.sp -= 1;
        Ok(address)
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
