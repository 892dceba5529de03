//! Basic synchronous copy example with a length limit.
//!
//! Run with:
//!     cargo run --example sync_basic

use copyrs::{CancelToken, Copier, CopyConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A source larger than what we want to relay
    let body = vec![0x42u8; 1024 * 1024]; // 1 MB

    let copier = Copier::new(CopyConfig::default());
    let cancel = CancelToken::new();

    println!("Source: {} bytes", body.len());

    // Relay only the first 256 KiB
    let mut dest = Vec::new();
    let copied = copier.copy(&mut body.as_slice(), &mut dest, Some(256 * 1024), &cancel)?;
    println!("Bounded copy: {} bytes relayed", copied);

    // Relay everything
    let mut dest = Vec::new();
    let copied = copier.copy(&mut body.as_slice(), &mut dest, None, &cancel)?;
    println!("Unbounded copy: {} bytes relayed", copied);

    // Pool is drained again once both calls returned
    println!("Outstanding pool buffers: {}", copier.pool().outstanding());

    Ok(())
}
