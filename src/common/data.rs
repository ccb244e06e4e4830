//! Memory Access Types.
//!
//! This module defines the classification of memory accesses used by the
//! Memory Management Unit (MMU) to validate page permissions and report
//! faults correctly.

/// Type of memory access operation.
///
/// Used to distinguish between instruction fetches, data reads, and data
/// writes when the MMU checks a page's permission tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Instruction fetch access.
    ///
    /// Used when fetching instructions from memory for execution.
    /// Any mapped page may be fetched from.
    Fetch,

    /// Data read access.
    ///
    /// Used when loading data from memory into registers.
    /// Any mapped page may be read.
    Read,

    /// Data write access.
    ///
    /// Used when storing data from registers to memory.
    /// Requires the `ReadWrite` permission tag.
    Write,
}
