#![no_main]

use copyrs::{BufferPool, CancelToken, Copier, CopyConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (Vec<u8>, u64, bool)| {
    let (data, raw_limit, bounded) = input;
    let limit = bounded.then_some(raw_limit % (data.len() as u64 + 64));

    // Exercise several buffer sizes, including ones smaller than the data
    for buffer_size in [1usize, 3, 64, 4096] {
        let pool = BufferPool::new(buffer_size);
        let config = CopyConfig::new(buffer_size).unwrap();
        let copier = Copier::with_pool(config, pool.clone());

        let mut dest = Vec::new();
        let copied = copier
            .copy(&mut data.as_slice(), &mut dest, limit, &CancelToken::new())
            .unwrap();

        // Verify: output is the exact clamped prefix of the input
        let expected = match limit {
            Some(l) => (l as usize).min(data.len()),
            None => data.len(),
        };
        assert_eq!(copied as usize, expected);
        assert_eq!(dest, &data[..expected]);

        // Verify: no buffer leaked
        assert_eq!(pool.outstanding(), 0);
    }

    // Pre-cancelled token: never writes, never leaks
    let pool = BufferPool::new(4096);
    let copier = Copier::with_pool(CopyConfig::default(), pool.clone());
    let token = CancelToken::new();
    token.cancel();

    let mut dest = Vec::new();
    let result = copier.copy(&mut data.as_slice(), &mut dest, limit, &token);
    if limit == Some(0) {
        // The limit check precedes the cancellation checkpoint
        assert!(result.is_ok());
    } else {
        assert!(result.unwrap_err().is_cancelled());
    }
    assert!(dest.is_empty());
    assert_eq!(pool.outstanding(), 0);
});
