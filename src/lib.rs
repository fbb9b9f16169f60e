pub use chip8::{Chip8, Status};
pub use constants::CLOCK_SPEED;
pub use error::{Fault, LoadError};
pub use framebuffer::Framebuffer;
pub use host::{FrameSink, InputSource, Keypad, NoInput, RomSource};
pub use instruction::Instruction;
pub use opcode::Opcode;
pub use state::State;

mod chip8;
pub mod constants;
mod error;
mod framebuffer;
mod host;
mod instruction;
mod opcode;
pub mod operations;
pub mod state;
