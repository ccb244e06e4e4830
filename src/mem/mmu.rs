//! Memory Management Unit.
//!
//! The sole path by which the execution core touches memory. Splits a
//! virtual address at the 4 KiB page boundary, resolves the page through the
//! injected [`Translator`], enforces the page's permission tag, and moves
//! little-endian words to and from the backing page.

use crate::common::{AccessType, MemFault, PAGE_SHIFT, VPO_MASK};
use crate::mem::page_table::{Permission, Translator};

/// Virtual-memory access unit.
///
/// Stateless today; the struct marks the seam where a TLB would sit.
pub struct Mmu;

impl Mmu {
    pub fn new() -> Self {
        Self
    }

    /// Performs one word-granular access at a virtual address.
    ///
    /// The low two bits of the page offset are dropped: the backing store is
    /// read and written in aligned words, and sub-word placement is the
    /// caller's job. Reads return the assembled word; writes return 0. On a
    /// fault the word is 0 and memory is left untouched.
    pub fn mem_access(
        &self,
        translator: &mut dyn Translator,
        vaddr: u32,
        data: u32,
        access: AccessType,
    ) -> (u32, Option<MemFault>) {
        let vpn = vaddr >> PAGE_SHIFT;
        let vpo = vaddr & VPO_MASK;

        let Some(entry) = translator.translate(vpn) else {
            return (0, Some(MemFault::Miss));
        };

        let off = (vpo & !3) as usize;
        match access {
            // Both permission tags allow reads and fetches.
            AccessType::Fetch | AccessType::Read => {
                let b = &entry.bytes()[off..off + 4];
                (u32::from_le_bytes([b[0], b[1], b[2], b[3]]), None)
            }
            AccessType::Write => {
                if entry.permission() != Permission::ReadWrite {
                    return (0, Some(MemFault::Perms));
                }
                entry.bytes_mut()[off..off + 4].copy_from_slice(&data.to_le_bytes());
                (0, None)
            }
        }
    }
}

impl Default for Mmu {
    fn default() -> Self {
        Self::new()
    }
}
