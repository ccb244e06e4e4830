//! funct3 field values (bits [14:12]) of the base ISA.

// Loads.
pub const LB: u32 = 0b000;
pub const LH: u32 = 0b001;
pub const LW: u32 = 0b010;
pub const LBU: u32 = 0b100;
pub const LHU: u32 = 0b101;

// Stores.
pub const SB: u32 = 0b000;
pub const SH: u32 = 0b001;
pub const SW: u32 = 0b010;

// Branches.
pub const BEQ: u32 = 0b000;
pub const BNE: u32 = 0b001;
pub const BLT: u32 = 0b100;
pub const BGE: u32 = 0b101;
pub const BLTU: u32 = 0b110;
pub const BGEU: u32 = 0b111;

// Integer register/immediate operations.
pub const ADD_SUB: u32 = 0b000;
pub const SLL: u32 = 0b001;
pub const SLT: u32 = 0b010;
pub const SLTU: u32 = 0b011;
pub const XOR: u32 = 0b100;
pub const SRL_SRA: u32 = 0b101;
pub const OR: u32 = 0b110;
pub const AND: u32 = 0b111;
