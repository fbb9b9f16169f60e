use thiserror::Error;

/// A condition that stops the machine.
///
/// A step that returns a `Fault` leaves the machine exactly as it was before the step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("address {address:#06X} is out of range")]
    AddressFault { address: usize },

    #[error("pixel ({x}, {y}) is outside the display")]
    CoordinateFault { x: usize, y: usize },

    #[error("stack overflow: too many nested subroutine calls")]
    StackOverflow,

    #[error("stack underflow: returned with no active subroutine call")]
    StackUnderflow,

    #[error("unknown opcode {opcode:#06X}")]
    UnknownOpcode { opcode: u16 },
}

/// Failure to load a ROM into a fresh machine.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("ROM is {size} bytes but at most {max} fit in memory")]
    RomTooLarge { size: usize, max: usize },

    #[error("unable to read ROM: {0}")]
    Io(#[from] std::io::Error),
}
