use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{MAX_ROM_SIZE, PROGRAM_START};
use crate::error::{Fault, LoadError};
use crate::framebuffer::Framebuffer;
use crate::host::{FrameSink, InputSource, RomSource};
use crate::instruction::Instruction;
use crate::opcode::Opcode;
use crate::operations;
use crate::state::State;

/// Whether the machine can still execute instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    /// Terminal; a new machine has to be loaded to continue.
    Halted(Fault),
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - whether it is still running or has halted on a fault
///
/// Supplies interfaces for:
/// - loading roms
/// - advancing the CPU one instruction at a time
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
///
/// It owns no clock. The host calls `step` at the emulation clock rate and
/// `tick_timers` at 60Hz, from the same thread.
pub struct Chip8 {
    state: State,
    status: Status,
    rng: StdRng,
}

impl Chip8 {
    /// A blank machine with only the sprite sheet in memory.
    pub fn new() -> Self {
        Chip8 {
            state: State::new(),
            status: Status::Running,
            rng: StdRng::from_entropy(),
        }
    }

    /// A fresh machine with `rom` copied in at 0x200
    ///
    /// # Arguments
    /// * `rom` the raw program; a flat sequence of big-endian instructions
    pub fn from_bytes(rom: &[u8]) -> Result<Self, LoadError> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(LoadError::RomTooLarge {
                size: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }
        let mut chip8 = Chip8::new();
        let start = PROGRAM_START as usize;
        chip8.state.memory[start..start + rom.len()].copy_from_slice(rom);
        debug!("loaded {} byte ROM at {:#05X}", rom.len(), PROGRAM_START);
        Ok(chip8)
    }

    /// Load a rom from a source such as a file
    ///
    /// # Arguments
    /// * `source` where the ROM is read from, exactly once
    pub fn load(source: &mut dyn RomSource) -> Result<Self, LoadError> {
        let rom = source.read_rom()?;
        Self::from_bytes(&rom)
    }

    /// Replaces the random number source, e.g. with a seeded one for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Direct access to the machine state, for debuggers and tests.
    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_halted(&self) -> bool {
        matches!(self.status, Status::Halted(_))
    }

    /// Advances the CPU by a single instruction
    /// - fetches the opcode at the pc and moves the pc past it
    /// - decodes and executes it
    ///
    /// On a fault the state is left as it was before the call and the machine halts;
    /// every later call reports the same fault.
    pub fn step(&mut self, input: &dyn InputSource) -> Result<(), Fault> {
        if let Status::Halted(fault) = self.status {
            return Err(fault);
        }

        let result = self.execute_next(input);
        if let Err(fault) = result {
            warn!("halted at {:#05X}: {}", self.state.pc, fault);
            self.status = Status::Halted(fault);
        }
        result
    }

    fn execute_next(&mut self, input: &dyn InputSource) -> Result<(), Fault> {
        let address = self.state.pc;
        let op = self.get_op()?;
        let instruction = Instruction::decode(op);
        trace!(
            "{:#05X}  {}  {}  v{:02X?} i{:04X} sp{}",
            address,
            op,
            instruction,
            self.state.v,
            self.state.i,
            self.state.sp
        );

        self.state.pc = address.wrapping_add(0x2);
        let result = operations::execute(instruction, &mut self.state, input, &mut self.rng);
        if result.is_err() {
            // Handlers validate before writing, so only the pc needs rolling back
            self.state.pc = address;
        }
        result
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> Result<Opcode, Fault> {
        Ok(Opcode(self.state.read_word(self.state.pc as usize)?))
    }

    /// Decrements the delay and sound timers toward 0.
    /// Meant to be called at 60Hz regardless of the CPU clock speed.
    pub fn tick_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    /// Whether the buzzer should be sounding.
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// Returns the FrameBuffer if the display should be redrawn
    pub fn frame(&self) -> Option<&Framebuffer> {
        if self.state.draw_flag {
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Hands the frame to `sink` if it changed since the last call.
    /// Returns whether anything was rendered.
    pub fn present(&mut self, sink: &mut dyn FrameSink) -> bool {
        if !self.state.draw_flag {
            return false;
        }
        sink.render(&self.state.frame_buffer);
        self.state.draw_flag = false;
        true
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
