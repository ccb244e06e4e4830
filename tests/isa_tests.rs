//! Integration tests for instruction field extraction and the decode table.

use rv32_sim::core::control::{AluOp, InstClass, OpASrc, OpBSrc};
use rv32_sim::isa::instruction::InstructionBits;
use rv32_sim::isa::{abi, decode, disasm, opcodes};

/// Tests instruction opcode extraction.
#[test]
fn test_instruction_bits_opcode() {
    let inst = 0x00008067u32; // jalr x0, 0(x1)
    assert_eq!(inst.opcode(), 0x67);
}

/// Tests register field extraction on `addi x1, x1, 1`.
#[test]
fn test_instruction_bits_regs() {
    let inst = 0x00108093u32;
    assert_eq!(inst.rd(), 1);
    assert_eq!(inst.rs1(), 1);
    assert_eq!(inst.funct3(), 0);
}

/// Tests rs2 and funct7 extraction on `add x2, x2, x1`.
#[test]
fn test_instruction_bits_rs2_funct7() {
    let inst = 0x00110133u32;
    assert_eq!(inst.rs2(), 1);
    assert_eq!(inst.funct7(), 0);
}

/// Tests I-immediate sign extension in both directions.
#[test]
fn test_imm_i_sign_extension() {
    let pos = 0x00108093u32; // addi x1, x1, 1
    assert_eq!(pos.imm_i(), 1);

    let neg = 0xfff08093u32; // addi x1, x1, -1
    assert_eq!(neg.imm_i() as i32, -1);
}

/// Tests the U-immediate keeps its upper-20-bit placement.
#[test]
fn test_imm_u_placement() {
    let inst = 0x12345037u32; // lui x0, 0x12345
    assert_eq!(inst.imm_u(), 0x12345 << 12);
}

/// Tests the J-immediate on the canonical backward jump `jal x0, -8`.
#[test]
fn test_imm_j_backward() {
    let inst = 0xff9ff06fu32;
    assert_eq!(inst.imm_j() as i32, -8);
}

/// Tests the B-immediate on a backward branch `beq x0, x0, -4`.
#[test]
fn test_imm_b_backward() {
    let inst = 0xfe000ee3u32;
    assert_eq!(inst.imm_b() as i32, -4);
}

/// Tests the S-immediate sign extension on `sw x1, -4(x2)`.
#[test]
fn test_imm_s_backward() {
    // imm[11:5] = 0x7f, imm[4:0] = 0x1c
    let inst = 0xfe112e23u32;
    assert_eq!(inst.imm_s() as i32, -4);
}

/// Tests decode of register-register ALU instructions.
#[test]
fn test_decode_add_sub() {
    let add = 0x00110133u32; // add x2, x2, x1
    let entry = decode::lookup(add).expect("add decodes");
    assert_eq!(entry.signals.class, InstClass::Alu);
    assert_eq!(entry.signals.alu, AluOp::Add);
    assert_eq!(entry.signals.b_src, OpBSrc::Reg2);

    let sub = 0x40110133u32; // sub x2, x2, x1
    let entry = decode::lookup(sub).expect("sub decodes");
    assert_eq!(entry.signals.alu, AluOp::Sub);
}

/// Tests decode of LUI and AUIPC operand sources.
#[test]
fn test_decode_upper_immediates() {
    let lui = 0x12345037u32;
    let entry = decode::lookup(lui).expect("lui decodes");
    assert_eq!(entry.signals.a_src, OpASrc::Zero);
    assert_eq!(entry.signals.b_src, OpBSrc::ImmU);

    let auipc = 0x12345017u32;
    let entry = decode::lookup(auipc).expect("auipc decodes");
    assert_eq!(entry.signals.a_src, OpASrc::Pc);
}

/// Tests that loads and stores decode as the memory class.
#[test]
fn test_decode_load_store() {
    let lw = 0x0000a083u32; // lw x1, 0(x1)
    let entry = decode::lookup(lw).expect("lw decodes");
    assert_eq!(entry.signals.class, InstClass::Mem);
    assert!(entry.signals.mem_read);
    assert!(!entry.signals.mem_write);

    let sw = 0x0010a023u32; // sw x1, 0(x1)
    let entry = decode::lookup(sw).expect("sw decodes");
    assert!(entry.signals.mem_write);
}

/// Tests that the system instructions decode as control class.
#[test]
fn test_decode_system() {
    let entry = decode::lookup(opcodes::ECALL).expect("ecall decodes");
    assert_eq!(entry.signals.class, InstClass::Ctrl);
    assert_eq!(entry.mnemonic, "ecall");

    let entry = decode::lookup(opcodes::EBREAK).expect("ebreak decodes");
    assert_eq!(entry.mnemonic, "ebreak");
}

/// Tests that encodings outside the implemented base set are illegal.
#[test]
fn test_decode_illegal() {
    // All zeros and all ones are not instructions.
    assert!(decode::lookup(0x0000_0000).is_none());
    assert!(decode::lookup(0xffff_ffff).is_none());

    // CSRRW mstatus lives in the system space but is not implemented.
    assert!(decode::lookup(0x3000_9073).is_none());

    // Branch with undefined funct3 = 0b010.
    assert!(decode::lookup(0x0000_a063).is_none());

    // FENCE is outside the implemented set.
    assert!(decode::lookup(0x0ff0_000fu32).is_none());
}

/// Tests ABI register constants.
#[test]
fn test_abi_constants() {
    assert_eq!(abi::REG_ZERO, 0);
    assert_eq!(abi::REG_RA, 1);
    assert_eq!(abi::REG_SP, 2);
    assert_eq!(abi::REG_A0, 10);
    assert_eq!(abi::REG_A7, 17);
    assert_eq!(abi::REG_NAMES[abi::REG_SP], "sp");
}

/// Tests disassembly of a few representative encodings.
#[test]
fn test_disasm_text() {
    assert_eq!(disasm::disasm(0x00108093), "addi ra, ra, 1");
    assert_eq!(disasm::disasm(opcodes::EBREAK), "ebreak");
    assert_eq!(disasm::disasm(0xdeadbeef & !0x7f), ".word 0xdeadbe80");
}
