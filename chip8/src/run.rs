use std::time::{Duration, Instant};

use log::{debug, info};

use chip8_vm::{Chip8, Fault, FrameSink, Instruction, Opcode};

use crate::config::RunConfig;

/// Drives `chip8` until it halts or `config.cycle_limit` instructions have run.
///
/// Timers tick once every `steps_per_tick` instructions. In real time mode
/// each instruction takes at least one clock period and the screen is redrawn
/// whenever the program draws; otherwise only the final frame is rendered.
///
/// Returns the number of instructions executed, or the fault that halted the machine.
pub fn run(chip8: &mut Chip8, config: &RunConfig, sink: &mut dyn FrameSink) -> Result<u64, Fault> {
    let cycle_time = Duration::from_secs(1) / config.clock.max(1);
    let steps_per_tick = config.steps_per_tick();
    let mut last_cycle = Instant::now();
    let mut cycles: u64 = 0;

    let result = loop {
        if config.cycle_limit.map_or(false, |limit| cycles >= limit) {
            break Ok(cycles);
        }
        if let Err(fault) = chip8.step(&config.keypad) {
            break Err(fault);
        }
        cycles += 1;

        if cycles % steps_per_tick == 0 {
            chip8.tick_timers();
            if chip8.sound_active() {
                debug!("beep");
            }
        }

        if config.realtime {
            chip8.present(sink);

            let current_time = Instant::now();
            let elapsed_cycle_time = current_time - last_cycle;
            if cycle_time > elapsed_cycle_time {
                std::thread::sleep(cycle_time - elapsed_cycle_time);
            }
            last_cycle = Instant::now();
        }
    };

    if !chip8.present(sink) && !config.realtime {
        sink.render(&chip8.state().frame_buffer);
    }
    info!("stopped after {} instructions", cycles);
    result
}

/// One line per instruction: address, raw opcode, then the decoded form.
/// A trailing odd byte is listed as data.
pub fn disassemble(rom: &[u8], start: u16) -> Vec<String> {
    rom.chunks(2)
        .enumerate()
        .map(|(index, bytes)| {
            let address = start as usize + index * 2;
            match (bytes[0], bytes.get(1)) {
                (high, Some(&low)) => {
                    let op = Opcode::from_bytes(high, low);
                    format!("{:03X}  {}  {}", address, op, Instruction::decode(op))
                }
                (byte, None) => format!("{:03X}  {:02X}    DB 0x{:02X}", address, byte, byte),
            }
        })
        .collect()
}
