//! Flat-Binary Loader.
//!
//! This module populates a page table with a program image and an initial
//! stack, the way the external kernel layer would, and hands back the entry
//! point. The execution core never sees any of this: it only consumes the
//! resulting translation capability.

use std::fs;

use thiserror::Error;

use crate::common::PAGE_SHIFT;
use crate::mem::page_table::{PageTable, Permission};

/// Distance from the load base to the top of the initial stack.
const STACK_TOP_OFFSET: u32 = 0x0100_0000;

/// Error loading a program image.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("could not read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("empty program image '{path}'")]
    Empty { path: String },
}

/// A program mapped into a fresh address space.
pub struct LoadedProgram {
    /// Entry program counter (the load base).
    pub entry: u32,
    /// First address above the mapped stack block.
    pub stack_top: u32,
    /// Bytes copied from the image.
    pub image_len: usize,
}

/// Reads a flat binary from disk and maps it read-write at `base`.
pub fn load_flat_binary(
    pt: &mut PageTable,
    path: &str,
    base: u32,
    stack_pages: u32,
) -> Result<LoadedProgram, LoaderError> {
    let image = fs::read(path).map_err(|source| LoaderError::Io {
        path: path.to_string(),
        source,
    })?;
    if image.is_empty() {
        return Err(LoaderError::Empty {
            path: path.to_string(),
        });
    }
    Ok(load_image(pt, &image, base, stack_pages))
}

/// Maps an in-memory image at `base` plus a stack block below `stack_top`.
///
/// Split out from the file path so tests can load programs without touching
/// disk. The entry point is the load base.
pub fn load_image(
    pt: &mut PageTable,
    image: &[u8],
    base: u32,
    stack_pages: u32,
) -> LoadedProgram {
    pt.write_bytes(base, image, Permission::ReadWrite);

    let stack_top = base.wrapping_add(STACK_TOP_OFFSET);
    let top_vpn = stack_top >> PAGE_SHIFT;
    for i in 0..stack_pages {
        pt.map(top_vpn.wrapping_sub(1 + i), Permission::ReadWrite);
    }

    LoadedProgram {
        entry: base,
        stack_top,
        image_len: image.len(),
    }
}
