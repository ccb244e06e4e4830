use serde::Deserialize;

const DEFAULT_LOAD_BASE: u32 = 0x8000_0000;
const DEFAULT_STACK_PAGES: u32 = 16;
const DEFAULT_CLOCK_PERIOD: u32 = 500;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub memory: MemoryConfig,

    #[serde(default)]
    pub clock: ClockConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub log_level: u8,

    #[serde(default)]
    pub log_start_cycle: u64,
}

#[derive(Debug, Deserialize)]
pub struct MemoryConfig {
    #[serde(default = "default_load_base")]
    pub load_base: String,

    #[serde(default = "default_stack_pages")]
    pub stack_pages: u32,
}

impl MemoryConfig {
    pub fn load_base_val(&self) -> u32 {
        parse_hex(&self.load_base, DEFAULT_LOAD_BASE)
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            load_base: default_load_base(),
            stack_pages: DEFAULT_STACK_PAGES,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ClockConfig {
    #[serde(default = "default_clock_period")]
    pub period: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            period: DEFAULT_CLOCK_PERIOD,
        }
    }
}

pub fn parse_hex(s: &str, default: u32) -> u32 {
    let s = s.trim_start_matches("0x");
    u32::from_str_radix(s, 16).unwrap_or(default)
}

fn default_load_base() -> String {
    format!("{:#x}", DEFAULT_LOAD_BASE)
}

fn default_stack_pages() -> u32 {
    DEFAULT_STACK_PAGES
}

fn default_clock_period() -> u32 {
    DEFAULT_CLOCK_PERIOD
}
