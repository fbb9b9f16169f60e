//! One handler per instruction.
//!
//! Handlers run after the fetch has already moved `pc` past the instruction, so a skip
//! only has to add another 2. Every handler validates its operands before writing
//! anything, which means a handler that fails leaves `state` untouched.

use rand::Rng;

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_ADDRESS, GLYPH_SIZE};
use crate::error::Fault;
use crate::host::InputSource;
use crate::instruction::Instruction;
use crate::state::State;

pub type Outcome = Result<(), Fault>;

/// Runs a decoded instruction against `state`.
pub fn execute<R: Rng>(
    instruction: Instruction,
    state: &mut State,
    input: &dyn InputSource,
    rng: &mut R,
) -> Outcome {
    use Instruction::*;

    match instruction {
        Sys(_) => Ok(()),
        Clear => clr(state),
        Return => rts(state),
        Jump(addr) => jump(state, addr),
        Call(addr) => call(state, addr),
        SkipEqualByte(x, kk) => ske(state, x, kk),
        SkipNotEqualByte(x, kk) => skne(state, x, kk),
        SkipEqual(x, y) => skre(state, x, y),
        LoadByte(x, kk) => load(state, x, kk),
        AddByte(x, kk) => add(state, x, kk),
        Move(x, y) => mv(state, x, y),
        Or(x, y) => or(state, x, y),
        And(x, y) => and(state, x, y),
        Xor(x, y) => xor(state, x, y),
        Add(x, y) => addr(state, x, y),
        Sub(x, y) => sub(state, x, y),
        ShiftRight(x) => shr(state, x),
        SubNeg(x, y) => subn(state, x, y),
        ShiftLeft(x) => shl(state, x),
        SkipNotEqual(x, y) => skrne(state, x, y),
        LoadIndex(addr) => loadi(state, addr),
        JumpOffset(addr) => jumpi(state, addr),
        Random(x, kk) => rnd(state, x, kk, rng),
        Draw(x, y, n) => draw(state, x, y, n),
        SkipPressed(x) => skpr(state, x, input),
        SkipNotPressed(x) => skup(state, x, input),
        LoadDelay(x) => moved(state, x),
        WaitKey(x) => keyd(state, x, input),
        SetDelay(x) => setd(state, x),
        SetSound(x) => sets(state, x),
        AddIndex(x) => addi(state, x),
        LoadGlyph(x) => ldspr(state, x),
        StoreBcd(x) => bcd(state, x),
        StoreRegisters(x) => stor(state, x),
        LoadRegisters(x) => read(state, x),
        Unknown(op) => Err(Fault::UnknownOpcode { opcode: op.0 }),
    }
}

fn skip_if(state: &mut State, condition: bool) -> Outcome {
    if condition {
        state.pc = state.pc.wrapping_add(0x2);
    }
    Ok(())
}

/// clear
pub fn clr(state: &mut State) -> Outcome {
    state.frame_buffer.clear();
    state.draw_flag = true;
    Ok(())
}

/// PC = STACK.pop()
pub fn rts(state: &mut State) -> Outcome {
    state.pc = state.pop()?;
    Ok(())
}

/// PC = addr
pub fn jump(state: &mut State, addr: u16) -> Outcome {
    state.pc = addr;
    Ok(())
}

/// STACK.push(PC); PC = addr
pub fn call(state: &mut State, addr: u16) -> Outcome {
    let return_address = state.pc;
    state.push(return_address)?;
    state.pc = addr;
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(state: &mut State, x: u8, kk: u8) -> Outcome {
    let vx = state.register(x)?;
    skip_if(state, vx == kk)
}

/// if Vx != kk then pc += 2
pub fn skne(state: &mut State, x: u8, kk: u8) -> Outcome {
    let vx = state.register(x)?;
    skip_if(state, vx != kk)
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &mut State, x: u8, y: u8) -> Outcome {
    let (vx, vy) = (state.register(x)?, state.register(y)?);
    skip_if(state, vx == vy)
}

/// Vx = kk
pub fn load(state: &mut State, x: u8, kk: u8) -> Outcome {
    state.set_register(x, kk)
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(state: &mut State, x: u8, kk: u8) -> Outcome {
    let vx = state.register(x)?;
    state.set_register(x, vx.wrapping_add(kk))
}

/// Vx = Vy
pub fn mv(state: &mut State, x: u8, y: u8) -> Outcome {
    state.register(x)?;
    let vy = state.register(y)?;
    state.set_register(x, vy)
}

/// Vx |= Vy
pub fn or(state: &mut State, x: u8, y: u8) -> Outcome {
    let (vx, vy) = (state.register(x)?, state.register(y)?);
    state.set_register(x, vx | vy)
}

/// Vx &= Vy
pub fn and(state: &mut State, x: u8, y: u8) -> Outcome {
    let (vx, vy) = (state.register(x)?, state.register(y)?);
    state.set_register(x, vx & vy)
}

/// Vx ^= Vy
pub fn xor(state: &mut State, x: u8, y: u8) -> Outcome {
    let (vx, vy) = (state.register(x)?, state.register(y)?);
    state.set_register(x, vx ^ vy)
}

/// Vx += Vy; VF = carry
pub fn addr(state: &mut State, x: u8, y: u8) -> Outcome {
    let (vx, vy) = (state.register(x)?, state.register(y)?);
    let sum = u16::from(vx) + u16::from(vy);
    state.set_register(x, sum as u8)?;
    state.set_flag(sum > 0xFF);
    Ok(())
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(state: &mut State, x: u8, y: u8) -> Outcome {
    let (vx, vy) = (state.register(x)?, state.register(y)?);
    state.set_register(x, vx.wrapping_sub(vy))?;
    state.set_flag(vx > vy);
    Ok(())
}

/// Vx /= 2; VF = the bit shifted out
pub fn shr(state: &mut State, x: u8) -> Outcome {
    let vx = state.register(x)?;
    state.set_register(x, vx >> 1)?;
    state.set_flag(vx & 0x1 == 0x1);
    Ok(())
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(state: &mut State, x: u8, y: u8) -> Outcome {
    let (vx, vy) = (state.register(x)?, state.register(y)?);
    state.set_register(x, vy.wrapping_sub(vx))?;
    state.set_flag(vy > vx);
    Ok(())
}

/// Vx *= 2; VF = the bit shifted out
pub fn shl(state: &mut State, x: u8) -> Outcome {
    let vx = state.register(x)?;
    state.set_register(x, vx << 1)?;
    state.set_flag(vx & 0x80 == 0x80);
    Ok(())
}

/// if Vx != Vy then pc += 2
pub fn skrne(state: &mut State, x: u8, y: u8) -> Outcome {
    let (vx, vy) = (state.register(x)?, state.register(y)?);
    skip_if(state, vx != vy)
}

/// I = addr
pub fn loadi(state: &mut State, addr: u16) -> Outcome {
    state.i = addr;
    Ok(())
}

/// PC = V0 + addr
pub fn jumpi(state: &mut State, addr: u16) -> Outcome {
    state.pc = addr.wrapping_add(u16::from(state.v[0x0]));
    Ok(())
}

/// Vx = rand_byte & kk
pub fn rnd<R: Rng>(state: &mut State, x: u8, kk: u8, rng: &mut R) -> Outcome {
    state.register(x)?;
    let rand_byte: u8 = rng.gen();
    state.set_register(x, rand_byte & kk)
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels were erased
pub fn draw(state: &mut State, x: u8, y: u8, n: u8) -> Outcome {
    let x0 = state.register(x)? as usize;
    let y0 = state.register(y)? as usize;
    let start = state.i as usize;
    let height = (n & 0xF) as usize;
    state.check_range(start, height)?;

    let mut collision = false;
    for row in 0..height {
        let sprite_row = state.memory[start + row];
        let py = (y0 + row) % DISPLAY_HEIGHT;
        for bit in 0..8 {
            if (sprite_row >> (7 - bit)) & 0x1 == 0x1 {
                let px = (x0 + bit) % DISPLAY_WIDTH;
                collision |= state.frame_buffer.flip(px, py)?;
            }
        }
    }

    state.draw_flag = true;
    state.set_flag(collision);
    Ok(())
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: &mut State, x: u8, input: &dyn InputSource) -> Outcome {
    let key = state.register(x)?;
    skip_if(state, input.is_pressed(key))
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: &mut State, x: u8, input: &dyn InputSource) -> Outcome {
    let key = state.register(x)?;
    skip_if(state, !input.is_pressed(key))
}

/// Vx = DT
pub fn moved(state: &mut State, x: u8) -> Outcome {
    let delay = state.delay_timer;
    state.set_register(x, delay)
}

/// await keypress for Vx
/// With no key down the pc is wound back so this instruction runs again next cycle.
pub fn keyd(state: &mut State, x: u8, input: &dyn InputSource) -> Outcome {
    state.register(x)?;
    match input.first_pressed() {
        Some(key) => state.set_register(x, key),
        None => {
            state.pc = state.pc.wrapping_sub(0x2);
            Ok(())
        }
    }
}

/// DT = Vx
pub fn setd(state: &mut State, x: u8) -> Outcome {
    state.delay_timer = state.register(x)?;
    Ok(())
}

/// ST = Vx
pub fn sets(state: &mut State, x: u8) -> Outcome {
    state.sound_timer = state.register(x)?;
    Ok(())
}

/// I += Vx
pub fn addi(state: &mut State, x: u8) -> Outcome {
    let vx = state.register(x)?;
    state.i = state.i.wrapping_add(u16::from(vx));
    Ok(())
}

/// I = address of the glyph for the low nibble of Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(state: &mut State, x: u8) -> Outcome {
    let digit = u16::from(state.register(x)? & 0xF);
    state.i = FONT_ADDRESS + digit * GLYPH_SIZE;
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(state: &mut State, x: u8) -> Outcome {
    let vx = state.register(x)?;
    let digits = [vx / 100 % 10, vx / 10 % 10, vx % 10];
    state.write_bytes(state.i as usize, &digits)
}

/// mem[I..=I+x] = V0..=Vx
/// I is left unchanged
pub fn stor(state: &mut State, x: u8) -> Outcome {
    state.register(x)?;
    let registers = state.v;
    state.write_bytes(state.i as usize, &registers[..=x as usize])
}

/// V0..=Vx = mem[I..=I+x]
/// I is left unchanged
pub fn read(state: &mut State, x: u8) -> Outcome {
    state.register(x)?;
    let len = x as usize + 1;
    let mut loaded = [0; 16];
    loaded[..len].copy_from_slice(state.read_bytes(state.i as usize, len)?);
    state.v[..len].copy_from_slice(&loaded[..len]);
    Ok(())
}
