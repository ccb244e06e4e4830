//! Simulation statistics collection and reporting.
//!
//! Tracks retired-instruction counts, the per-class instruction mix, and
//! event totals during simulation execution.

use std::time::Instant;

/// Counters accumulated over one simulation.
pub struct SimStats {
    start_time: Instant,
    pub cycles: u64,
    pub instructions_retired: u64,

    pub inst_alu: u64,
    pub inst_mem: u64,
    pub inst_ctrl: u64,

    pub clock_interrupts: u64,
    pub syscalls: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_mem: 0,
            inst_ctrl: 0,
            clock_interrupts: 0,
            syscalls: 0,
        }
    }
}

impl SimStats {
    /// Prints a formatted summary of the simulation statistics.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let instr = if self.instructions_retired == 0 {
            1
        } else {
            self.instructions_retired
        };
        let mips = (self.instructions_retired as f64 / seconds) / 1_000_000.0;

        let pct = |n: u64| (n as f64 / instr as f64) * 100.0;

        println!("\n==========================================");
        println!("RV32 SIMULATION STATISTICS");
        println!("==========================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_cycles               {}", self.cycles);
        println!("sim_insts                {}", self.instructions_retired);
        println!("sim_mips                 {:.2}", mips);
        println!("------------------------------------------");
        println!("INSTRUCTION MIX");
        println!(
            "  op.alu                 {} ({:.2}%)",
            self.inst_alu,
            pct(self.inst_alu)
        );
        println!(
            "  op.mem                 {} ({:.2}%)",
            self.inst_mem,
            pct(self.inst_mem)
        );
        println!(
            "  op.ctrl                {} ({:.2}%)",
            self.inst_ctrl,
            pct(self.inst_ctrl)
        );
        println!("------------------------------------------");
        println!("EVENTS");
        println!("  clock_interrupts       {}", self.clock_interrupts);
        println!("  syscalls               {}", self.syscalls);
        println!("==========================================");
    }

    /// Machine-readable form of the same counters.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "host_seconds": self.start_time.elapsed().as_secs_f64(),
            "sim_cycles": self.cycles,
            "sim_insts": self.instructions_retired,
            "inst_alu": self.inst_alu,
            "inst_mem": self.inst_mem,
            "inst_ctrl": self.inst_ctrl,
            "clock_interrupts": self.clock_interrupts,
            "syscalls": self.syscalls,
        })
    }
}
