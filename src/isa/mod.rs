//! Instruction Set Architecture definitions.
//!
//! Implements the fixed RV32I base encoding consumed by the execution core:
//! field and immediate extraction, the flat decode table mapping encodings to
//! control signals, ABI register assignments, and the disassembler used for
//! trace output.

/// Register indices and ABI names.
pub mod abi;

/// Flat decode table: encoding pattern to control signals.
pub mod decode;

/// Mnemonic formatting for trace logs.
pub mod disasm;

/// funct3 field values of the base ISA.
pub mod funct3;

/// Bit-field and immediate extraction over raw instruction words.
pub mod instruction;

/// Opcode field values and exact system-instruction encodings.
pub mod opcodes;
