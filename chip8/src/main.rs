use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

use clap::Parser;
use log::{error, info};

use chip8_vm::constants::PROGRAM_START;
use chip8_vm::{Chip8, RomSource};

mod config;
mod display;
mod keymap;
mod run;

use config::{Args, RunConfig};
use display::AsciiDisplay;

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(e) = start(&args) {
        error!("{}", e);
        eprintln!("chip8: {}", e);
        process::exit(1);
    }
}

fn start(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut reader = BufReader::new(File::open(&args.rom)?);

    if args.disassemble {
        for line in run::disassemble(&reader.read_rom()?, PROGRAM_START) {
            println!("{}", line);
        }
        return Ok(());
    }

    let config = RunConfig::from_args(args)?;
    let mut chip8 = Chip8::load(&mut reader)?;
    if let Some(seed) = args.seed {
        chip8 = chip8.with_seed(seed);
    }
    info!("loaded {}", args.rom.display());

    let mut display = AsciiDisplay::new(io::stdout(), config.realtime);
    run::run(&mut chip8, &config, &mut display)?;
    Ok(())
}
