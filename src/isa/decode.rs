//! Instruction decode table.
//!
//! A flat, read-only table with one row per base-ISA instruction the core
//! implements. Each row pairs an encoding pattern (significant bits under a
//! mask) with the control-signal record that drives execution. Encodings
//! with no matching row decode as illegal; the core never guesses.
//!
//! Loads and stores match on the opcode field alone: their width and
//! signedness come from funct3 inside the memory handler.

use crate::core::control::{AluOp, ControlSignals, InstClass, OpASrc, OpBSrc};
use crate::isa::opcodes;

/// One row of the decode table.
pub struct DecodeEntry {
    /// Significant bits of the encoding.
    pub mask: u32,
    /// Expected values of the significant bits.
    pub bits: u32,
    /// Mnemonic used by the disassembler.
    pub mnemonic: &'static str,
    /// Control record driving execution.
    pub signals: ControlSignals,
}

const MASK_OP: u32 = 0x0000_007f;
const MASK_OP_F3: u32 = 0x0000_707f;
const MASK_OP_F3_F7: u32 = 0xfe00_707f;
const MASK_EXACT: u32 = 0xffff_ffff;

const fn alu(op: AluOp, a: OpASrc, b: OpBSrc) -> ControlSignals {
    ControlSignals {
        class: InstClass::Alu,
        alu: op,
        a_src: a,
        b_src: b,
        mem_read: false,
        mem_write: false,
    }
}

const fn mem(read: bool, write: bool) -> ControlSignals {
    ControlSignals {
        class: InstClass::Mem,
        alu: AluOp::Add,
        a_src: OpASrc::Reg1,
        b_src: OpBSrc::ImmI,
        mem_read: read,
        mem_write: write,
    }
}

const fn ctrl() -> ControlSignals {
    ControlSignals {
        class: InstClass::Ctrl,
        alu: AluOp::Add,
        a_src: OpASrc::Reg1,
        b_src: OpBSrc::Reg2,
        mem_read: false,
        mem_write: false,
    }
}

const fn f3(opcode: u32, funct3: u32) -> u32 {
    opcode | (funct3 << 12)
}

const fn f3f7(opcode: u32, funct3: u32, funct7: u32) -> u32 {
    opcode | (funct3 << 12) | (funct7 << 25)
}

/// The base-ISA decode table.
///
/// Exact system encodings come first; they live inside the OP_SYSTEM space
/// and must win before any coarser pattern could.
#[rustfmt::skip]
pub static DECODE_TABLE: &[DecodeEntry] = &[
    DecodeEntry { mask: MASK_EXACT, bits: opcodes::ECALL,  mnemonic: "ecall",  signals: ctrl() },
    DecodeEntry { mask: MASK_EXACT, bits: opcodes::EBREAK, mnemonic: "ebreak", signals: ctrl() },

    DecodeEntry { mask: MASK_OP, bits: opcodes::OP_LUI,   mnemonic: "lui",   signals: alu(AluOp::Add, OpASrc::Zero, OpBSrc::ImmU) },
    DecodeEntry { mask: MASK_OP, bits: opcodes::OP_AUIPC, mnemonic: "auipc", signals: alu(AluOp::Add, OpASrc::Pc,   OpBSrc::ImmU) },

    DecodeEntry { mask: MASK_OP_F3, bits: f3(opcodes::OP_IMM, 0b000), mnemonic: "addi",  signals: alu(AluOp::Add,  OpASrc::Reg1, OpBSrc::ImmI) },
    DecodeEntry { mask: MASK_OP_F3, bits: f3(opcodes::OP_IMM, 0b010), mnemonic: "slti",  signals: alu(AluOp::Slt,  OpASrc::Reg1, OpBSrc::ImmI) },
    DecodeEntry { mask: MASK_OP_F3, bits: f3(opcodes::OP_IMM, 0b011), mnemonic: "sltiu", signals: alu(AluOp::Sltu, OpASrc::Reg1, OpBSrc::ImmI) },
    DecodeEntry { mask: MASK_OP_F3, bits: f3(opcodes::OP_IMM, 0b100), mnemonic: "xori",  signals: alu(AluOp::Xor,  OpASrc::Reg1, OpBSrc::ImmI) },
    DecodeEntry { mask: MASK_OP_F3, bits: f3(opcodes::OP_IMM, 0b110), mnemonic: "ori",   signals: alu(AluOp::Or,   OpASrc::Reg1, OpBSrc::ImmI) },
    DecodeEntry { mask: MASK_OP_F3, bits: f3(opcodes::OP_IMM, 0b111), mnemonic: "andi",  signals: alu(AluOp::And,  OpASrc::Reg1, OpBSrc::ImmI) },

    DecodeEntry { mask: MASK_OP_F3_F7, bits: f3f7(opcodes::OP_IMM, 0b001, 0b0000000), mnemonic: "slli", signals: alu(AluOp::Sll, OpASrc::Reg1, OpBSrc::ImmI) },
    DecodeEntry { mask: MASK_OP_F3_F7, bits: f3f7(opcodes::OP_IMM, 0b101, 0b0000000), mnemonic: "srli", signals: alu(AluOp::Srl, OpASrc::Reg1, OpBSrc::ImmI) },
    DecodeEntry { mask: MASK_OP_F3_F7, bits: f3f7(opcodes::OP_IMM, 0b101, 0b0100000), mnemonic: "srai", signals: alu(AluOp::Sra, OpASrc::Reg1, OpBSrc::ImmI) },

    DecodeEntry { mask: MASK_OP_F3_F7, bits: f3f7(opcodes::OP_REG, 0b000, 0b0000000), mnemonic: "add",  signals: alu(AluOp::Add,  OpASrc::Reg1, OpBSrc::Reg2) },
    DecodeEntry { mask: MASK_OP_F3_F7, bits: f3f7(opcodes::OP_REG, 0b000, 0b0100000), mnemonic: "sub",  signals: alu(AluOp::Sub,  OpASrc::Reg1, OpBSrc::Reg2) },
    DecodeEntry { mask: MASK_OP_F3_F7, bits: f3f7(opcodes::OP_REG, 0b001, 0b0000000), mnemonic: "sll",  signals: alu(AluOp::Sll,  OpASrc::Reg1, OpBSrc::Reg2) },
    DecodeEntry { mask: MASK_OP_F3_F7, bits: f3f7(opcodes::OP_REG, 0b010, 0b0000000), mnemonic: "slt",  signals: alu(AluOp::Slt,  OpASrc::Reg1, OpBSrc::Reg2) },
    DecodeEntry { mask: MASK_OP_F3_F7, bits: f3f7(opcodes::OP_REG, 0b011, 0b0000000), mnemonic: "sltu", signals: alu(AluOp::Sltu, OpASrc::Reg1, OpBSrc::Reg2) },
    DecodeEntry { mask: MASK_OP_F3_F7, bits: f3f7(opcodes::OP_REG, 0b100, 0b0000000), mnemonic: "xor",  signals: alu(AluOp::Xor,  OpASrc::Reg1, OpBSrc::Reg2) },
    DecodeEntry { mask: MASK_OP_F3_F7, bits: f3f7(opcodes::OP_REG, 0b101, 0b0000000), mnemonic: "srl",  signals: alu(AluOp::Srl,  OpASrc::Reg1, OpBSrc::Reg2) },
    DecodeEntry { mask: MASK_OP_F3_F7, bits: f3f7(opcodes::OP_REG, 0b101, 0b0100000), mnemonic: "sra",  signals: alu(AluOp::Sra,  OpASrc::Reg1, OpBSrc::Reg2) },
    DecodeEntry { mask: MASK_OP_F3_F7, bits: f3f7(opcodes::OP_REG, 0b110, 0b0000000), mnemonic: "or",   signals: alu(AluOp::Or,   OpASrc::Reg1, OpBSrc::Reg2) },
    DecodeEntry { mask: MASK_OP_F3_F7, bits: f3f7(opcodes::OP_REG, 0b111, 0b0000000), mnemonic: "and",  signals: alu(AluOp::And,  OpASrc::Reg1, OpBSrc::Reg2) },

    DecodeEntry { mask: MASK_OP, bits: opcodes::OP_LOAD,  mnemonic: "load",  signals: mem(true, false) },
    DecodeEntry { mask: MASK_OP, bits: opcodes::OP_STORE, mnemonic: "store", signals: mem(false, true) },

    DecodeEntry { mask: MASK_OP,    bits: opcodes::OP_JAL,            mnemonic: "jal",  signals: ctrl() },
    DecodeEntry { mask: MASK_OP_F3, bits: f3(opcodes::OP_JALR, 0b000), mnemonic: "jalr", signals: ctrl() },

    DecodeEntry { mask: MASK_OP_F3, bits: f3(opcodes::OP_BRANCH, 0b000), mnemonic: "beq",  signals: ctrl() },
    DecodeEntry { mask: MASK_OP_F3, bits: f3(opcodes::OP_BRANCH, 0b001), mnemonic: "bne",  signals: ctrl() },
    DecodeEntry { mask: MASK_OP_F3, bits: f3(opcodes::OP_BRANCH, 0b100), mnemonic: "blt",  signals: ctrl() },
    DecodeEntry { mask: MASK_OP_F3, bits: f3(opcodes::OP_BRANCH, 0b101), mnemonic: "bge",  signals: ctrl() },
    DecodeEntry { mask: MASK_OP_F3, bits: f3(opcodes::OP_BRANCH, 0b110), mnemonic: "bltu", signals: ctrl() },
    DecodeEntry { mask: MASK_OP_F3, bits: f3(opcodes::OP_BRANCH, 0b111), mnemonic: "bgeu", signals: ctrl() },
];

/// Looks up the control record for a raw instruction word.
///
/// `None` means the word is not a legal instruction for this core.
pub fn lookup(inst: u32) -> Option<&'static DecodeEntry> {
    DECODE_TABLE.iter().find(|e| inst & e.mask == e.bits)
}
