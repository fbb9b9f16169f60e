use chip8_vm::constants::SPRITE_SHEET;
use chip8_vm::{Chip8, Fault, FrameSink, Framebuffer, InputSource, Keypad, NoInput};

const MAX_STEPS: usize = 10_000;

fn assemble(words: &[u16]) -> Vec<u8> {
    words.iter().flat_map(|word| word.to_be_bytes().to_vec()).collect()
}

fn load(words: &[u16]) -> Chip8 {
    Chip8::from_bytes(&assemble(words)).unwrap().with_seed(0)
}

/// Steps until the program parks itself on a jump to its own address.
fn run_until_loop(chip8: &mut Chip8, input: &dyn InputSource) -> Result<usize, Fault> {
    for steps in 0..MAX_STEPS {
        let pc = chip8.state().pc;
        chip8.step(input)?;
        if chip8.state().pc == pc {
            return Ok(steps);
        }
        if steps % 8 == 7 {
            chip8.tick_timers();
        }
    }
    panic!("program did not settle within {} steps", MAX_STEPS);
}

fn assert_glyph(frame: &Framebuffer, glyph: usize, x0: usize, y0: usize) {
    for row in 0..5 {
        let bits = SPRITE_SHEET[glyph * 5 + row];
        for col in 0..4 {
            let expected = (bits >> (7 - col)) & 1 == 1;
            assert_eq!(
                frame.get(x0 + col, y0 + row),
                Ok(expected),
                "glyph {:X} pixel ({}, {})",
                glyph,
                col,
                row
            );
        }
    }
}

struct Capture(Option<Framebuffer>);

impl FrameSink for Capture {
    fn render(&mut self, frame: &Framebuffer) {
        self.0 = Some(frame.clone());
    }
}

#[test]
fn counts_to_ten() {
    let mut chip8 = load(&[
        0x6000, // LD V0, 0
        0x7001, // ADD V0, 1
        0x300A, // SE V0, 10
        0x1202, // JP 0x202
        0x1208, // JP 0x208
    ]);
    run_until_loop(&mut chip8, &NoInput).unwrap();
    assert_eq!(chip8.state().v[0x0], 10);
    assert_eq!(chip8.state().pc, 0x208);
}

#[test]
fn calls_and_returns() {
    let mut chip8 = load(&[
        0x2206, // CALL 0x206
        0x6155, // LD V1, 0x55
        0x1204, // JP 0x204
        0x6066, // LD V0, 0x66
        0x00EE, // RET
    ]);
    run_until_loop(&mut chip8, &NoInput).unwrap();
    assert_eq!(chip8.state().v[0x0], 0x66);
    assert_eq!(chip8.state().v[0x1], 0x55);
    assert_eq!(chip8.state().sp, 0);
}

#[test]
fn draws_decimal_digits() {
    let mut chip8 = load(&[
        0x6A7B, // LD VA, 123
        0xA300, // LD I, 0x300
        0xFA33, // LD B, VA
        0xF265, // LD V2, [I]
        0x6300, // LD V3, 0
        0x6400, // LD V4, 0
        0xF029, // LD F, V0
        0xD345, // DRW V3, V4, 5
        0x7305, // ADD V3, 5
        0xF129, // LD F, V1
        0xD345, // DRW V3, V4, 5
        0x7305, // ADD V3, 5
        0xF229, // LD F, V2
        0xD345, // DRW V3, V4, 5
        0x121C, // JP 0x21C
    ]);
    run_until_loop(&mut chip8, &NoInput).unwrap();

    let mut capture = Capture(None);
    assert!(chip8.present(&mut capture));
    let frame = capture.0.unwrap();
    assert_glyph(&frame, 1, 0, 0);
    assert_glyph(&frame, 2, 5, 0);
    assert_glyph(&frame, 3, 10, 0);
    assert_eq!(chip8.state().v[0xF], 0);
    assert_eq!(chip8.state().v[0x0..0x3], [1, 2, 3]);
}

#[test]
fn waits_on_the_delay_timer() {
    let mut chip8 = load(&[
        0x6005, // LD V0, 5
        0xF015, // LD DT, V0
        0xF107, // LD V1, DT
        0x3100, // SE V1, 0
        0x1204, // JP 0x204
        0x120A, // JP 0x20A
    ]);
    let steps = run_until_loop(&mut chip8, &NoInput).unwrap();
    assert!(steps > 5 * 8);
    assert_eq!(chip8.state().delay_timer, 0);
    assert_eq!(chip8.state().pc, 0x20A);
}

#[test]
fn reads_held_keys() {
    let mut chip8 = load(&[
        0x6007, // LD V0, 7
        0xE09E, // SKP V0
        0x1202, // JP 0x202
        0xF10A, // LD V1, K
        0x1208, // JP 0x208
    ]);
    let mut keypad = Keypad::new();
    for _ in 0..10 {
        chip8.step(&keypad).unwrap();
    }
    assert!(chip8.state().pc < 0x206);

    keypad.key_press(0x7);
    run_until_loop(&mut chip8, &keypad).unwrap();
    assert_eq!(chip8.state().v[0x1], 0x7);
}

#[test]
fn bad_opcode_halts_the_machine() {
    let mut chip8 = load(&[
        0x6001, // LD V0, 1
        0x8008, // not an instruction
    ]);
    assert_eq!(
        run_until_loop(&mut chip8, &NoInput),
        Err(Fault::UnknownOpcode { opcode: 0x8008 })
    );
    assert!(chip8.is_halted());
    assert_eq!(chip8.state().pc, 0x202);
    assert_eq!(chip8.state().v[0x0], 1);
}
