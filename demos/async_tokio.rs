//! Async copy with tokio and mid-flight cancellation.
//!
//! Demonstrates running several bounded copies concurrently on one shared
//! pool, and cancelling one of them from another task.
//!
//! Run with:
//!     cargo run --example async_tokio --features async-io

use std::time::Duration;

use copyrs::{BufferPool, CancelToken, Copier, CopyConfig, CopyError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let pool = BufferPool::new(4096);
    let copier = Copier::with_pool(CopyConfig::default(), pool.clone());

    // Several independent streams sharing one pool
    let streams: Vec<Vec<u8>> = (0..3u8).map(|seed| vec![seed; 500_000]).collect();

    let handles: Vec<_> = streams
        .into_iter()
        .enumerate()
        .map(|(stream_id, data)| {
            let copier = copier.clone();
            tokio::spawn(async move {
                let mut dest = Vec::new();
                let copied = copier
                    .copy_async(&data[..], &mut dest, Some(200_000), CancelToken::new())
                    .await?;
                Ok::<_, CopyError>((stream_id, copied))
            })
        })
        .collect();

    for handle in handles {
        let (stream_id, copied) = handle.await??;
        println!("Stream {}: {} bytes relayed", stream_id, copied);
    }

    // Cancellation from another task: a reader that never ends
    let token = CancelToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let (writer_end, reader_end) = tokio::io::duplex(1024);
    tokio::spawn(async move {
        use tokio::io::AsyncWriteExt;
        let mut writer_end = writer_end;
        while writer_end.write_all(&[0xAB; 1024]).await.is_ok() {}
    });

    let endless = tokio_util::compat::TokioAsyncReadCompatExt::compat(reader_end);
    let mut sink = Vec::new();

    match copier.copy_async(endless, &mut sink, None, token).await {
        Err(CopyError::Cancelled { bytes_copied }) => {
            println!("Endless stream cancelled after {} bytes", bytes_copied);
        }
        other => println!("Unexpected outcome: {:?}", other),
    }

    println!("Outstanding pool buffers: {}", pool.outstanding());
    Ok(())
}
