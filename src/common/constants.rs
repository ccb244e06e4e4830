//! Common constants used throughout the simulator.

/// Number of general-purpose registers.
pub const NUM_REGS: usize = 32;

/// Size of a machine word in bytes.
pub const WORD_SIZE: u32 = 4;

/// Bit shift for the page size (12 bits = 4 KiB pages).
pub const PAGE_SHIFT: u32 = 12;

/// Size of a page in bytes.
pub const PAGE_SIZE: usize = 1 << PAGE_SHIFT;

/// Mask selecting the page-offset bits of a virtual address.
pub const VPO_MASK: u32 = (1 << PAGE_SHIFT) - 1;
