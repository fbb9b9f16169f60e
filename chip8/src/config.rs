use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use chip8_vm::constants::TIMER_SPEED;
use chip8_vm::{Keypad, CLOCK_SPEED};

use crate::keymap::keymap;

/// Cycles executed when neither a limit nor real time pacing is requested.
pub const DEFAULT_CYCLES: u64 = 10_000;

#[derive(Parser, Debug)]
#[command(name = "chip8", about = "Headless Chip-8 interpreter")]
pub struct Args {
    /// ROM image to load
    #[arg(value_name = "ROM")]
    pub rom: PathBuf,

    /// Instructions executed per second
    #[arg(long, default_value_t = CLOCK_SPEED)]
    pub clock: u32,

    /// Stop after this many instructions
    #[arg(long, value_name = "N")]
    pub cycles: Option<u64>,

    /// Keys held down for the whole run, on the 1234/QWER/ASDF/ZXCV layout
    #[arg(long, value_name = "KEYS", value_delimiter = ',')]
    pub hold: Vec<char>,

    /// Pace execution at the clock speed and redraw the screen as it changes
    #[arg(long, default_value_t = false)]
    pub realtime: bool,

    /// Seed for the RND instruction
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the decoded program instead of running it
    #[arg(long, default_value_t = false)]
    pub disassemble: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("clock speed must be at least 1Hz")]
    ZeroClock,
    #[error("'{0}' is not a keypad key")]
    UnmappedKey(char),
}

/// Everything the run loop needs, validated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub clock: u32,
    /// `None` runs until the machine halts
    pub cycle_limit: Option<u64>,
    pub keypad: Keypad,
    pub realtime: bool,
}

impl RunConfig {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        if args.clock == 0 {
            return Err(ConfigError::ZeroClock);
        }

        let mut keypad = Keypad::new();
        for &key in args.hold.iter() {
            keypad.key_press(keymap(key).ok_or(ConfigError::UnmappedKey(key))?);
        }

        let cycle_limit = match (args.cycles, args.realtime) {
            (Some(0), _) | (None, true) => None,
            (Some(cycles), _) => Some(cycles),
            (None, false) => Some(DEFAULT_CYCLES),
        };

        Ok(RunConfig {
            clock: args.clock,
            cycle_limit,
            keypad,
            realtime: args.realtime,
        })
    }

    /// How many instructions run between two 60Hz timer ticks
    pub fn steps_per_tick(&self) -> u64 {
        (u64::from(self.clock) / u64::from(TIMER_SPEED)).max(1)
    }
}
