//! General-Purpose Register File.
//!
//! This module implements the 32-entry register file (x0-x31) of one
//! simulated hart. It enforces the architectural invariant that register
//! x0 is hardwired to zero.

use crate::common::NUM_REGS;
use crate::isa::abi::REG_NAMES;

/// General-Purpose Register file.
///
/// Contains 32 registers used for integer operations. Register x0 is
/// hardwired to zero and cannot be modified.
pub struct Gpr {
    regs: [u32; NUM_REGS],
}

impl Gpr {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self {
            regs: [0; NUM_REGS],
        }
    }

    /// Reads a general-purpose register value.
    ///
    /// Register x0 always returns 0 regardless of storage. An index outside
    /// 0-31 is a decode defect, not a program condition, and panics.
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 {
            0
        } else {
            self.regs[idx]
        }
    }

    /// Writes a value to a general-purpose register.
    ///
    /// Writes to register x0 are silently ignored. An index outside 0-31
    /// is a decode defect, not a program condition, and panics.
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Dumps the contents of all registers to stdout, four per line,
    /// labeled with their ABI names.
    pub fn dump(&self) {
        println!("Registers");
        println!("=========");
        for row in (0..NUM_REGS).step_by(4) {
            let mut line = String::new();
            for r in row..row + 4 {
                let label = format!("{} (x{}):", REG_NAMES[r], r);
                line.push_str(&format!("{:<11}0x{:08x}    ", label, self.regs[r]));
            }
            println!("{}", line.trim_end());
        }
    }
}

impl Default for Gpr {
    fn default() -> Self {
        Self::new()
    }
}
