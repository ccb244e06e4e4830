//! RV32 Simulator CLI.
//!
//! The driver that owns the page table, loads the program, and decides how
//! to respond to each engine event; the engine only classifies and reports.
//!
//! # Event policy
//!
//! * `Clock` — log the interrupt and resume at the current PC.
//! * `Ecall` — service a minimal syscall set (exit, write) and resume.
//! * `Ebreak` — treat as normal completion.
//! * `IllegalInstruction` / page faults — report and terminate the program;
//!   the simulator process itself stays healthy.

use clap::Parser;
use std::io::Write;
use std::{fs, process};

use rv32_sim::common::{AccessType, Event};
use rv32_sim::config::{parse_hex, Config};
use rv32_sim::core::Cpu;
use rv32_sim::isa::abi;
use rv32_sim::mem::PageTable;
use rv32_sim::sim::loader;

/// Exit syscall number (a7).
const SYS_EXIT: u32 = 93;

/// Write syscall number (a7).
const SYS_WRITE: u32 = 64;

/// Command-line arguments for the RV32 simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "RV32 Instruction-Level Simulator")]
struct Args {
    #[arg(short, long, default_value = "configs/default.toml")]
    config: String,

    /// Flat binary image to execute.
    #[arg(short, long)]
    file: String,

    /// Override the configured load base (hex, e.g. 0x1000).
    #[arg(long)]
    base: Option<String>,

    /// Override the configured log level (0-6).
    #[arg(short, long)]
    log_level: Option<u8>,

    /// Print final statistics as JSON.
    #[arg(long)]
    json_stats: bool,
}

fn main() {
    let args = Args::parse();
    let config_content = fs::read_to_string(&args.config).expect("Failed to read config");
    let config: Config = toml::from_str(&config_content).expect("Failed to parse config");

    let log_level = args.log_level.unwrap_or(config.general.log_level);
    let load_base = match args.base {
        Some(ref s) => parse_hex(s, config.memory.load_base_val()),
        None => config.memory.load_base_val(),
    };

    let mut pt = PageTable::new();
    let program =
        match loader::load_flat_binary(&mut pt, &args.file, load_base, config.memory.stack_pages) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("\n[!] FATAL: {}", e);
                process::exit(1);
            }
        };

    let mut cpu = Cpu::new(&config);
    cpu.log.level = log_level;
    cpu.regs.write(abi::REG_SP, program.stack_top);

    if log_level >= 1 {
        println!("[Loader] {} bytes at {:#x}", program.image_len, load_base);
        println!(
            "[Loader] stack top {:#x}, clock period {}",
            program.stack_top,
            cpu.clock.period()
        );
    }

    let mut next_pc = program.entry;
    let exit_code = loop {
        let event = cpu.run(&mut pt, next_pc);
        next_pc = cpu.pc;

        match event {
            Event::Clock => {
                if log_level >= 1 {
                    println!("[clock] interrupt at cycle {}", cpu.stats.cycles);
                }
            }
            Event::Ecall => {
                if let Some(code) = handle_syscall(&mut cpu, &mut pt, log_level) {
                    break code;
                }
            }
            Event::Ebreak => {
                println!("Execution completed");
                break 0;
            }
            Event::IllegalInstruction => {
                eprintln!(
                    "Exception '{}' occurred at 0x{:08x} -- program terminated",
                    event, cpu.pc
                );
                break 1;
            }
            Event::PageFaultMiss { .. } | Event::PageFaultPerms { .. } => {
                eprintln!("Exception '{}' -- program terminated", event);
                break 1;
            }
            Event::None => {}
        }
    };

    if (1..5u8).contains(&log_level) {
        cpu.regs.dump();
        println!("pc = 0x{:08x}", cpu.pc);
    }
    if (2..6u8).contains(&log_level) {
        pt.dump(true);
    }

    if args.json_stats {
        println!("{}", cpu.stats.to_json());
    } else {
        cpu.stats.print();
    }

    std::io::stdout().flush().ok();
    process::exit(exit_code as i32);
}

/// Services an environment call; returns an exit code when the program asked
/// to stop.
fn handle_syscall(cpu: &mut Cpu, pt: &mut PageTable, log_level: u8) -> Option<u32> {
    cpu.stats.syscalls += 1;
    let num = cpu.regs.read(abi::REG_A7);

    match num {
        SYS_EXIT => Some(cpu.regs.read(abi::REG_A0)),
        SYS_WRITE => {
            let fd = cpu.regs.read(abi::REG_A0);
            let buf = cpu.regs.read(abi::REG_A1);
            let len = cpu.regs.read(abi::REG_A2);

            let mut data = Vec::with_capacity(len as usize);
            for i in 0..len {
                let addr = buf.wrapping_add(i);
                let (word, fault) = cpu.mmu.mem_access(pt, addr, 0, AccessType::Read);
                if fault.is_some() {
                    break;
                }
                data.push((word >> ((addr & 3) * 8)) as u8);
            }

            let written = match fd {
                1 => std::io::stdout().write(&data).unwrap_or(0),
                2 => std::io::stderr().write(&data).unwrap_or(0),
                _ => 0,
            };
            cpu.regs.write(abi::REG_A0, written as u32);
            None
        }
        _ => {
            if log_level >= 1 {
                eprintln!("[syscall] unhandled syscall {} at pc=0x{:08x}", num, cpu.pc);
            }
            cpu.regs.write(abi::REG_A0, u32::MAX);
            None
        }
    }
}
