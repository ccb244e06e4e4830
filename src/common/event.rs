//! Engine events.
//!
//! Every operation of the execution core reports its outcome through an
//! [`Event`]: the uniform result type carrying the exception or condition
//! kind and, for memory faults, the faulting address context. Events are
//! constructed fresh by each handler or translation step and consumed
//! immediately by the caller; they are never persisted.

use std::fmt;

/// Exception raised by the MMU on a failed memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemFault {
    /// No page table entry maps the virtual page.
    Miss,
    /// The page is mapped but its permission tag forbids the access.
    Perms,
}

/// Outcome of one engine operation.
///
/// The memory-fault variants carry the faulting virtual address and the
/// program counter of the faulting instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// The instruction retired without incident.
    None,

    /// The fetched word does not decode to a known instruction, or a
    /// load/store carried an undefined width.
    IllegalInstruction,

    /// An EBREAK was executed. The PC still addresses the breakpoint.
    Ebreak,

    /// An ECALL was executed. The PC has advanced past it.
    Ecall,

    /// The clock's retirement counter reached its period.
    Clock,

    /// A memory access touched an unmapped page.
    PageFaultMiss { addr: u32, pc: u32 },

    /// A memory access violated the page's permission tag.
    PageFaultPerms { addr: u32, pc: u32 },
}

impl Event {
    /// Returns true for the uneventful outcome.
    pub fn is_none(self) -> bool {
        matches!(self, Event::None)
    }

    /// Wraps an MMU fault together with its address context.
    pub fn from_fault(fault: MemFault, addr: u32, pc: u32) -> Self {
        match fault {
            MemFault::Miss => Event::PageFaultMiss { addr, pc },
            MemFault::Perms => Event::PageFaultPerms { addr, pc },
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::None => write!(f, "no event"),
            Event::IllegalInstruction => write!(f, "illegal instruction"),
            Event::Ebreak => write!(f, "breakpoint"),
            Event::Ecall => write!(f, "environment call"),
            Event::Clock => write!(f, "clock interrupt"),
            Event::PageFaultMiss { addr, pc } => {
                write!(f, "page fault (unmapped) at 0x{:08x}, pc=0x{:08x}", addr, pc)
            }
            Event::PageFaultPerms { addr, pc } => {
                write!(f, "page fault (permission) at 0x{:08x}, pc=0x{:08x}", addr, pc)
            }
        }
    }
}
