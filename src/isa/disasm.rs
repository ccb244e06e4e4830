//! Instruction disassembly for trace output.
//!
//! Observational only: the engine asks for this text when the configured
//! verbosity calls for it, nothing here affects execution.

use crate::isa::abi::REG_NAMES;
use crate::isa::instruction::InstructionBits;
use crate::isa::{decode, funct3, opcodes};

/// Formats one instruction as assembler-like text.
///
/// Unknown encodings render as `.word 0x........` so the trace stays legible.
pub fn disasm(inst: u32) -> String {
    let Some(entry) = decode::lookup(inst) else {
        return format!(".word 0x{:08x}", inst);
    };

    let rd = REG_NAMES[inst.rd()];
    let rs1 = REG_NAMES[inst.rs1()];
    let rs2 = REG_NAMES[inst.rs2()];

    match inst.opcode() {
        opcodes::OP_LUI | opcodes::OP_AUIPC => {
            format!("{} {}, 0x{:x}", entry.mnemonic, rd, inst.imm_u() >> 12)
        }
        opcodes::OP_JAL => format!("{} {}, {}", entry.mnemonic, rd, inst.imm_j() as i32),
        opcodes::OP_JALR => {
            format!("{} {}, {}({})", entry.mnemonic, rd, inst.imm_i() as i32, rs1)
        }
        opcodes::OP_BRANCH => {
            format!("{} {}, {}, {}", entry.mnemonic, rs1, rs2, inst.imm_b() as i32)
        }
        opcodes::OP_LOAD => {
            let mnemonic = match inst.funct3() {
                funct3::LB => "lb",
                funct3::LH => "lh",
                funct3::LW => "lw",
                funct3::LBU => "lbu",
                funct3::LHU => "lhu",
                _ => "load?",
            };
            format!("{} {}, {}({})", mnemonic, rd, inst.imm_i() as i32, rs1)
        }
        opcodes::OP_STORE => {
            let mnemonic = match inst.funct3() {
                funct3::SB => "sb",
                funct3::SH => "sh",
                funct3::SW => "sw",
                _ => "store?",
            };
            format!("{} {}, {}({})", mnemonic, rs2, inst.imm_s() as i32, rs1)
        }
        opcodes::OP_IMM => {
            // Shift encodings keep funct7 inside the I-immediate field.
            let imm = match inst.funct3() {
                funct3::SLL | funct3::SRL_SRA => (inst.imm_i() & 0x1f) as i32,
                _ => inst.imm_i() as i32,
            };
            format!("{} {}, {}, {}", entry.mnemonic, rd, rs1, imm)
        }
        opcodes::OP_REG => format!("{} {}, {}, {}", entry.mnemonic, rd, rs1, rs2),
        _ => entry.mnemonic.to_string(),
    }
}
