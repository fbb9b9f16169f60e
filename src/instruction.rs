use std::fmt;

use crate::opcode::Opcode;

/// A decoded Chip-8 instruction.
///
/// Register operands are register indices (`x`, `y`), `kk` is an 8-bit immediate,
/// `addr` is a 12-bit address and `n` is a 4-bit sprite height.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 0nnn: call a machine code routine; ignored
    Sys(u16),
    /// 00E0: clear the display
    Clear,
    /// 00EE: PC = STACK.pop()
    Return,
    /// 1nnn: PC = addr
    Jump(u16),
    /// 2nnn: STACK.push(PC); PC = addr
    Call(u16),
    /// 3xkk: if Vx == kk then skip
    SkipEqualByte(u8, u8),
    /// 4xkk: if Vx != kk then skip
    SkipNotEqualByte(u8, u8),
    /// 5xy0: if Vx == Vy then skip
    SkipEqual(u8, u8),
    /// 6xkk: Vx = kk
    LoadByte(u8, u8),
    /// 7xkk: Vx += kk
    AddByte(u8, u8),
    /// 8xy0: Vx = Vy
    Move(u8, u8),
    /// 8xy1: Vx |= Vy
    Or(u8, u8),
    /// 8xy2: Vx &= Vy
    And(u8, u8),
    /// 8xy3: Vx ^= Vy
    Xor(u8, u8),
    /// 8xy4: Vx += Vy; VF = carry
    Add(u8, u8),
    /// 8xy5: Vx -= Vy; VF = no borrow
    Sub(u8, u8),
    /// 8xy6: Vx >>= 1; VF = shifted out bit
    ShiftRight(u8),
    /// 8xy7: Vx = Vy - Vx; VF = no borrow
    SubNeg(u8, u8),
    /// 8xyE: Vx <<= 1; VF = shifted out bit
    ShiftLeft(u8),
    /// 9xy0: if Vx != Vy then skip
    SkipNotEqual(u8, u8),
    /// Annn: I = addr
    LoadIndex(u16),
    /// Bnnn: PC = V0 + addr
    JumpOffset(u16),
    /// Cxkk: Vx = rand_byte & kk
    Random(u8, u8),
    /// Dxyn: draw an n byte sprite from I at (Vx, Vy); VF = collision
    Draw(u8, u8, u8),
    /// Ex9E: if key Vx is down then skip
    SkipPressed(u8),
    /// ExA1: if key Vx is up then skip
    SkipNotPressed(u8),
    /// Fx07: Vx = DT
    LoadDelay(u8),
    /// Fx0A: Vx = next key down
    WaitKey(u8),
    /// Fx15: DT = Vx
    SetDelay(u8),
    /// Fx18: ST = Vx
    SetSound(u8),
    /// Fx1E: I += Vx
    AddIndex(u8),
    /// Fx29: I = address of the glyph for Vx
    LoadGlyph(u8),
    /// Fx33: mem[I..I+3] = bcd(Vx)
    StoreBcd(u8),
    /// Fx55: mem[I..=I+x] = V0..=Vx
    StoreRegisters(u8),
    /// Fx65: V0..=Vx = mem[I..=I+x]
    LoadRegisters(u8),
    /// Anything outside the instruction table
    Unknown(Opcode),
}

impl Instruction {
    /// Selects the Instruction for a given Opcode
    pub fn decode(op: Opcode) -> Self {
        use Instruction::*;

        let (x, y, n, kk, addr) = (op.x(), op.y(), op.n(), op.kk(), op.addr());
        match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Clear,
            (0x0, 0x0, 0xE, 0xE) => Return,
            (0x0, ..) => Sys(addr),
            (0x1, ..) => Jump(addr),
            (0x2, ..) => Call(addr),
            (0x3, ..) => SkipEqualByte(x, kk),
            (0x4, ..) => SkipNotEqualByte(x, kk),
            (0x5, .., 0x0) => SkipEqual(x, y),
            (0x6, ..) => LoadByte(x, kk),
            (0x7, ..) => AddByte(x, kk),
            (0x8, .., 0x0) => Move(x, y),
            (0x8, .., 0x1) => Or(x, y),
            (0x8, .., 0x2) => And(x, y),
            (0x8, .., 0x3) => Xor(x, y),
            (0x8, .., 0x4) => Add(x, y),
            (0x8, .., 0x5) => Sub(x, y),
            (0x8, .., 0x6) => ShiftRight(x),
            (0x8, .., 0x7) => SubNeg(x, y),
            (0x8, .., 0xE) => ShiftLeft(x),
            (0x9, .., 0x0) => SkipNotEqual(x, y),
            (0xA, ..) => LoadIndex(addr),
            (0xB, ..) => JumpOffset(addr),
            (0xC, ..) => Random(x, kk),
            (0xD, ..) => Draw(x, y, n),
            (0xE, _, 0x9, 0xE) => SkipPressed(x),
            (0xE, _, 0xA, 0x1) => SkipNotPressed(x),
            (0xF, _, 0x0, 0x7) => LoadDelay(x),
            (0xF, _, 0x0, 0xA) => WaitKey(x),
            (0xF, _, 0x1, 0x5) => SetDelay(x),
            (0xF, _, 0x1, 0x8) => SetSound(x),
            (0xF, _, 0x1, 0xE) => AddIndex(x),
            (0xF, _, 0x2, 0x9) => LoadGlyph(x),
            (0xF, _, 0x3, 0x3) => StoreBcd(x),
            (0xF, _, 0x5, 0x5) => StoreRegisters(x),
            (0xF, _, 0x6, 0x5) => LoadRegisters(x),
            _ => Unknown(op),
        }
    }
}

impl From<u16> for Instruction {
    fn from(word: u16) -> Self {
        Instruction::decode(Opcode(word))
    }
}

/// Disassembles into the conventional mnemonics, e.g. `LD V1, 0x22` or `DRW V0, V1, 5`.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            Sys(addr) => write!(f, "SYS {:#05X}", addr),
            Clear => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Jump(addr) => write!(f, "JP {:#05X}", addr),
            Call(addr) => write!(f, "CALL {:#05X}", addr),
            SkipEqualByte(x, kk) => write!(f, "SE V{:X}, {:#04X}", x, kk),
            SkipNotEqualByte(x, kk) => write!(f, "SNE V{:X}, {:#04X}", x, kk),
            SkipEqual(x, y) => write!(f, "SE V{:X}, V{:X}", x, y),
            LoadByte(x, kk) => write!(f, "LD V{:X}, {:#04X}", x, kk),
            AddByte(x, kk) => write!(f, "ADD V{:X}, {:#04X}", x, kk),
            Move(x, y) => write!(f, "LD V{:X}, V{:X}", x, y),
            Or(x, y) => write!(f, "OR V{:X}, V{:X}", x, y),
            And(x, y) => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor(x, y) => write!(f, "XOR V{:X}, V{:X}", x, y),
            Add(x, y) => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub(x, y) => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight(x) => write!(f, "SHR V{:X}", x),
            SubNeg(x, y) => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft(x) => write!(f, "SHL V{:X}", x),
            SkipNotEqual(x, y) => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex(addr) => write!(f, "LD I, {:#05X}", addr),
            JumpOffset(addr) => write!(f, "JP V0, {:#05X}", addr),
            Random(x, kk) => write!(f, "RND V{:X}, {:#04X}", x, kk),
            Draw(x, y, n) => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipPressed(x) => write!(f, "SKP V{:X}", x),
            SkipNotPressed(x) => write!(f, "SKNP V{:X}", x),
            LoadDelay(x) => write!(f, "LD V{:X}, DT", x),
            WaitKey(x) => write!(f, "LD V{:X}, K", x),
            SetDelay(x) => write!(f, "LD DT, V{:X}", x),
            SetSound(x) => write!(f, "LD ST, V{:X}", x),
            AddIndex(x) => write!(f, "ADD I, V{:X}", x),
            LoadGlyph(x) => write!(f, "LD F, V{:X}", x),
            StoreBcd(x) => write!(f, "LD B, V{:X}", x),
            StoreRegisters(x) => write!(f, "LD [I], V{:X}", x),
            LoadRegisters(x) => write!(f, "LD V{:X}, [I]", x),
            Unknown(op) => write!(f, "??? {}", op),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::Instruction::*;

    #[test]
    fn test_decodes_whole_table() {
        let table: [(u16, Instruction); 35] = [
            (0x0123, Sys(0x123)),
            (0x00E0, Clear),
            (0x00EE, Return),
            (0x1ABC, Jump(0xABC)),
            (0x2123, Call(0x123)),
            (0x3111, SkipEqualByte(0x1, 0x11)),
            (0x4111, SkipNotEqualByte(0x1, 0x11)),
            (0x5120, SkipEqual(0x1, 0x2)),
            (0x6122, LoadByte(0x1, 0x22)),
            (0x7122, AddByte(0x1, 0x22)),
            (0x8120, Move(0x1, 0x2)),
            (0x8121, Or(0x1, 0x2)),
            (0x8122, And(0x1, 0x2)),
            (0x8123, Xor(0x1, 0x2)),
            (0x8124, Add(0x1, 0x2)),
            (0x8125, Sub(0x1, 0x2)),
            (0x8126, ShiftRight(0x1)),
            (0x8127, SubNeg(0x1, 0x2)),
            (0x812E, ShiftLeft(0x1)),
            (0x9120, SkipNotEqual(0x1, 0x2)),
            (0xAABC, LoadIndex(0xABC)),
            (0xBABC, JumpOffset(0xABC)),
            (0xC1FF, Random(0x1, 0xFF)),
            (0xD125, Draw(0x1, 0x2, 0x5)),
            (0xE19E, SkipPressed(0x1)),
            (0xE1A1, SkipNotPressed(0x1)),
            (0xF107, LoadDelay(0x1)),
            (0xF10A, WaitKey(0x1)),
            (0xF115, SetDelay(0x1)),
            (0xF118, SetSound(0x1)),
            (0xF11E, AddIndex(0x1)),
            (0xF129, LoadGlyph(0x1)),
            (0xF133, StoreBcd(0x1)),
            (0xF155, StoreRegisters(0x1)),
            (0xF165, LoadRegisters(0x1)),
        ];
        assert_eq!(table.len(), 35);
        for &(word, expected) in table.iter() {
            assert_eq!(Instruction::from(word), expected, "decoding {:04X}", word);
        }
    }

    #[test]
    fn test_unknown_opcodes() {
        for &word in [0x5121u16, 0x812F, 0x9121, 0xE19F, 0xF1FF, 0xF100, 0xE000].iter() {
            assert_eq!(Instruction::from(word), Unknown(Opcode(word)));
        }
    }

    #[test]
    fn test_disassembly() {
        assert_eq!(Instruction::from(0x00E0u16).to_string(), "CLS");
        assert_eq!(Instruction::from(0x1200u16).to_string(), "JP 0x200");
        assert_eq!(Instruction::from(0x6A0Fu16).to_string(), "LD VA, 0x0F");
        assert_eq!(Instruction::from(0x8124u16).to_string(), "ADD V1, V2");
        assert_eq!(Instruction::from(0xD015u16).to_string(), "DRW V0, V1, 5");
        assert_eq!(Instruction::from(0xFB65u16).to_string(), "LD VB, [I]");
        assert_eq!(Instruction::from(0xFFFFu16).to_string(), "??? FFFF");
    }
}
