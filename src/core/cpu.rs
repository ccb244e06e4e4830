//! Execution engine.
//!
//! One [`Cpu`] value is the complete context of a simulated hart: register
//! file, program counter, clock, MMU, and statistics. Multiple contexts can
//! coexist; nothing here is global. The engine owns its registers and clock
//! exclusively, while the page table stays with the loader/kernel layer and
//! is borrowed per call through the [`Translator`] seam.

use crate::common::{AccessType, Event};
use crate::config::Config;
use crate::core::alu::Alu;
use crate::core::clock::Clock;
use crate::core::control::{ControlSignals, InstClass, OpASrc, OpBSrc};
use crate::core::gpr::Gpr;
use crate::isa::instruction::InstructionBits;
use crate::isa::{decode, disasm, funct3, opcodes};
use crate::mem::mmu::Mmu;
use crate::mem::page_table::Translator;
use crate::stats::SimStats;

/// Trace configuration for per-instruction logging.
///
/// The engine never decides whether to print, only what text to offer when
/// the configured level asks for it.
#[derive(Clone, Copy, Debug)]
pub struct LogConfig {
    /// Verbosity threshold: >=3 instruction trace, >=4 writeback detail,
    /// >=5 register dump per step.
    pub level: u8,
    /// Cycle count before which the instruction trace stays silent.
    pub start_cycle: u64,
}

/// Execution context of one simulated hart.
pub struct Cpu {
    pub regs: Gpr,
    pub pc: u32,
    pub clock: Clock,
    pub mmu: Mmu,
    pub stats: SimStats,
    pub log: LogConfig,
}

impl Cpu {
    pub fn new(config: &Config) -> Self {
        Self {
            regs: Gpr::new(),
            pc: 0,
            clock: Clock::new(config.clock.period),
            mmu: Mmu::new(),
            stats: SimStats::default(),
            log: LogConfig {
                level: config.general.log_level,
                start_cycle: config.general.log_start_cycle,
            },
        }
    }

    fn log_level(&self) -> u8 {
        if cfg!(feature = "always-trace") {
            6
        } else {
            self.log.level
        }
    }

    /// Runs from `entry` until an event surfaces.
    ///
    /// The clock is checked between steps, after the cycle and retirement
    /// counters advance. When it expires, [`Event::Clock`] supersedes
    /// whatever the pending step produced and the engine stops with the PC
    /// wherever that step left it. Re-invoking `run` with the current PC
    /// resumes execution.
    pub fn run(&mut self, translator: &mut dyn Translator, entry: u32) -> Event {
        self.pc = entry;
        loop {
            let event = self.single_step(translator);

            self.stats.cycles += 1;
            self.stats.instructions_retired += 1;

            if self.clock.tick() {
                self.stats.clock_interrupts += 1;
                return Event::Clock;
            }

            if self.log_level() >= 5 {
                self.regs.dump();
            }

            if !event.is_none() {
                return event;
            }
        }
    }

    /// Fetches, decodes, and executes exactly one instruction at the
    /// current PC.
    pub fn single_step(&mut self, translator: &mut dyn Translator) -> Event {
        let pc = self.pc;

        let (inst, fault) = self.mmu.mem_access(translator, pc, 0, AccessType::Fetch);
        if let Some(fault) = fault {
            return Event::from_fault(fault, pc, pc);
        }

        let Some(entry) = decode::lookup(inst) else {
            return Event::IllegalInstruction;
        };

        match entry.signals.class {
            InstClass::Alu => self.exec_alu(pc, inst, &entry.signals),
            InstClass::Mem => self.exec_mem(translator, pc, inst, &entry.signals),
            InstClass::Ctrl => self.exec_ctrl(pc, inst),
        }
    }

    fn exec_alu(&mut self, pc: u32, inst: u32, cs: &ControlSignals) -> Event {
        self.stats.inst_alu += 1;

        let a = match cs.a_src {
            OpASrc::Reg1 => self.regs.read(inst.rs1()),
            OpASrc::Pc => pc,
            OpASrc::Zero => 0,
        };
        let b = match cs.b_src {
            OpBSrc::Reg2 => self.regs.read(inst.rs2()),
            OpBSrc::ImmI => inst.imm_i(),
            OpBSrc::ImmU => inst.imm_u(),
        };

        let rd = inst.rd();
        let result = Alu::execute(cs.alu, a, b);
        let pc_next = pc.wrapping_add(4);

        self.regs.write(rd, result);
        self.pc = pc_next;
        self.log_exec(pc, inst, rd, result, pc_next);
        Event::None
    }

    fn exec_mem(
        &mut self,
        translator: &mut dyn Translator,
        pc: u32,
        inst: u32,
        cs: &ControlSignals,
    ) -> Event {
        self.stats.inst_mem += 1;

        let rs1_data = self.regs.read(inst.rs1());
        let f3 = inst.funct3();
        let pc_next = pc.wrapping_add(4);

        if cs.mem_read {
            let rd = inst.rd();
            let addr = rs1_data.wrapping_add(inst.imm_i());
            let shift = (addr & 3) * 8;

            // Sub-word accesses read the containing word and place the lane
            // themselves; word accesses go through unadjusted.
            let word_addr = match f3 {
                funct3::LW => addr,
                funct3::LB | funct3::LH | funct3::LBU | funct3::LHU => addr & !3,
                _ => return Event::IllegalInstruction,
            };

            let (word, fault) = self.mmu.mem_access(translator, word_addr, 0, AccessType::Read);
            if let Some(fault) = fault {
                return Event::from_fault(fault, word_addr, pc);
            }

            let value = match f3 {
                funct3::LB => ((word >> shift) as u8) as i8 as u32,
                funct3::LBU => (word >> shift) & 0xff,
                funct3::LH => ((word >> shift) as u16) as i16 as u32,
                funct3::LHU => (word >> shift) & 0xffff,
                _ => word,
            };

            self.regs.write(rd, value);
            self.pc = pc_next;
            self.log_exec(pc, inst, rd, value, pc_next);
        } else {
            let rs2_data = self.regs.read(inst.rs2());
            let addr = rs1_data.wrapping_add(inst.imm_s());
            let shift = (addr & 3) * 8;

            match f3 {
                funct3::SW => {
                    let (_, fault) =
                        self.mmu.mem_access(translator, addr, rs2_data, AccessType::Write);
                    if let Some(fault) = fault {
                        return Event::from_fault(fault, addr, pc);
                    }
                }
                funct3::SB | funct3::SH => {
                    // Read-modify-write of the containing word: only the
                    // target lane changes, the source is masked to its width.
                    let word_addr = addr & !3;
                    let (lane_mask, lane) = if f3 == funct3::SB {
                        (0xffu32 << shift, (rs2_data & 0xff) << shift)
                    } else {
                        (0xffffu32 << shift, (rs2_data & 0xffff) << shift)
                    };

                    let (old, fault) =
                        self.mmu.mem_access(translator, word_addr, 0, AccessType::Read);
                    if let Some(fault) = fault {
                        return Event::from_fault(fault, word_addr, pc);
                    }

                    let merged = (old & !lane_mask) | lane;
                    let (_, fault) =
                        self.mmu
                            .mem_access(translator, word_addr, merged, AccessType::Write);
                    if let Some(fault) = fault {
                        return Event::from_fault(fault, word_addr, pc);
                    }
                }
                _ => return Event::IllegalInstruction,
            }

            self.pc = pc_next;
            self.log_exec(pc, inst, 0, 0, pc_next);
        }

        Event::None
    }

    fn exec_ctrl(&mut self, pc: u32, inst: u32) -> Event {
        self.stats.inst_ctrl += 1;

        if inst == opcodes::EBREAK {
            // The PC stays on the breakpoint so the caller can observe it.
            self.log_exec(pc, inst, 0, 0, pc);
            return Event::Ebreak;
        }
        if inst == opcodes::ECALL {
            let pc_next = pc.wrapping_add(4);
            self.pc = pc_next;
            self.log_exec(pc, inst, 0, 0, pc_next);
            return Event::Ecall;
        }

        let rs1_data = self.regs.read(inst.rs1());
        let rs2_data = self.regs.read(inst.rs2());
        let pc_plus4 = pc.wrapping_add(4);

        let (pc_next, rd) = match inst.opcode() {
            opcodes::OP_JAL => (pc.wrapping_add(inst.imm_j()), inst.rd()),
            opcodes::OP_JALR => (rs1_data.wrapping_add(inst.imm_i()) & !1, inst.rd()),
            _ => {
                let taken = match inst.funct3() {
                    funct3::BEQ => rs1_data == rs2_data,
                    funct3::BNE => rs1_data != rs2_data,
                    funct3::BLT => (rs1_data as i32) < (rs2_data as i32),
                    funct3::BGE => (rs1_data as i32) >= (rs2_data as i32),
                    funct3::BLTU => rs1_data < rs2_data,
                    funct3::BGEU => rs1_data >= rs2_data,
                    _ => false,
                };
                let target = if taken {
                    pc.wrapping_add(inst.imm_b())
                } else {
                    pc_plus4
                };
                (target, 0)
            }
        };

        if matches!(inst.opcode(), opcodes::OP_JAL | opcodes::OP_JALR) {
            self.regs.write(rd, pc_plus4);
        }
        self.pc = pc_next;
        self.log_exec(pc, inst, rd, pc_plus4, pc_next);
        Event::None
    }

    /// Emits the per-instruction trace line, gated by the configured level.
    fn log_exec(&self, pc: u32, inst: u32, rd: usize, wbdata: u32, pc_next: u32) {
        let level = self.log_level();
        if level < 3 || self.stats.cycles < self.log.start_cycle {
            return;
        }
        let info = if level >= 4 {
            if rd != 0 {
                format!("# x{:<2} <- 0x{:08x}, pc_next=0x{:08x}", rd, wbdata, pc_next)
            } else {
                format!("# {:21}pc_next=0x{:08x}", "", pc_next)
            }
        } else {
            String::new()
        };
        println!(
            "{:3} 0x{:08x}: {:<30}{}",
            self.stats.cycles,
            pc,
            disasm::disasm(inst),
            info
        );
    }
}
