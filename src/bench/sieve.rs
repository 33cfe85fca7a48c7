//! Sieve of Eratosthenes kernels.
//!
//! Every kernel takes an all-`false` composite table of length `n`, marks
//! composites in place and returns the number of primes in `[2, n)`.
//!
//! - `serial`: one thread.
//! - `parallel_threads`: the table is cut into one block per thread. For
//!   every sieving prime a fresh set of scoped threads marks multiples in
//!   their own block, then the blocks are counted into an atomic total.
//! - `parallel_rayon`: multiples of each prime are marked with a rayon
//!   parallel iterator, and primes are counted with a parallel reduction.

use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

fn sqrt_floor(n: usize) -> usize {
    let mut r = (n as f64).sqrt() as usize;
    while r * r > n {
        r -= 1;
    }
    while (r + 1) * (r + 1) <= n {
        r += 1;
    }
    r
}

pub fn serial(composite: &mut [bool]) -> usize {
    let n = composite.len();
    for i in 2..=sqrt_floor(n) {
        if composite[i] {
            continue;
        }
        for j in (i * i..n).step_by(i) {
            composite[j] = true;
        }
    }
    composite.iter().skip(2).filter(|&&c| !c).count()
}

/// Block start offsets for `threads` workers over `n` cells.
///
/// Worker `t` owns `[t * n/threads, (t+1) * n/threads)`, the last worker
/// also takes the remainder.
pub fn block_starts(n: usize, threads: usize) -> Vec<usize> {
    let threads = threads.max(1);
    let step = n / threads;
    (0..threads).map(|t| t * step).collect()
}

/// Split `table` into the per-worker blocks of `block_starts`.
fn split_blocks<'a>(mut table: &'a mut [bool], starts: &[usize]) -> Vec<(usize, &'a mut [bool])> {
    let mut blocks = Vec::with_capacity(starts.len());
    for (t, &start) in starts.iter().enumerate() {
        let end = starts.get(t + 1).copied().unwrap_or(start + table.len());
        let (block, rest) = std::mem::take(&mut table).split_at_mut(end - start);
        blocks.push((start, block));
        table = rest;
    }
    blocks
}

fn mark_block(block: &mut [bool], offset: usize, prime: usize) {
    let end = offset + block.len();
    let mut first = (prime * prime).max(offset);
    let remainder = first % prime;
    if remainder != 0 {
        first += prime - remainder;
    }
    for j in (first..end).step_by(prime) {
        block[j - offset] = true;
    }
}

fn count_block(block: &[bool], offset: usize) -> usize {
    let skip = 2usize.saturating_sub(offset);
    block.iter().skip(skip).filter(|&&c| !c).count()
}

pub fn parallel_threads(composite: &mut [bool], threads: usize) -> usize {
    let n = composite.len();
    let starts = block_starts(n, threads);

    for i in 2..=sqrt_floor(n) {
        if composite[i] {
            continue;
        }
        let mut blocks = split_blocks(composite, &starts).into_iter();
        // Worker 0 runs on the calling thread.
        let first = blocks.next();
        thread::scope(|scope| {
            for (offset, block) in blocks {
                scope.spawn(move || mark_block(block, offset, i));
            }
            if let Some((offset, block)) = first {
                mark_block(block, offset, i);
            }
        });
    }

    let total = AtomicUsize::new(0);
    let mut blocks = split_blocks(composite, &starts).into_iter();
    let first = blocks.next();
    thread::scope(|scope| {
        for (offset, block) in blocks {
            let total = &total;
            scope.spawn(move || {
                total.fetch_add(count_block(block, offset), Ordering::Relaxed);
            });
        }
        if let Some((offset, block)) = first {
            total.fetch_add(count_block(block, offset), Ordering::Relaxed);
        }
    });
    total.into_inner()
}

/// Runs on the current rayon pool; size it with `ThreadPool::install`.
pub fn parallel_rayon(composite: &mut [bool]) -> usize {
    let n = composite.len();
    for i in 2..=sqrt_floor(n) {
        if composite[i] {
            continue;
        }
        // Chunks of length `i` starting at `i*i` each begin on a multiple of `i`.
        composite[i * i..]
            .par_chunks_mut(i)
            .for_each(|chunk| chunk[0] = true);
    }

    composite
        .par_iter()
        .enumerate()
        .filter(|&(idx, &c)| idx >= 2 && !c)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIMES_BELOW_10K: usize = 1229;

    fn table(n: usize) -> Vec<bool> {
        vec![false; n]
    }

    #[test]
    fn serial_counts_primes_below_ten_thousand() {
        assert_eq!(serial(&mut table(10_000)), PRIMES_BELOW_10K);
    }

    #[test]
    fn tiny_tables_have_no_or_few_primes() {
        let counts: Vec<usize> = (0..6).map(|n| serial(&mut table(n))).collect();
        assert_eq!(counts, vec![0, 0, 0, 1, 2, 2]);
    }

    #[test]
    fn thread_variant_agrees_for_any_worker_count() {
        for threads in [1, 2, 3, 7, 8, 16] {
            assert_eq!(
                parallel_threads(&mut table(10_000), threads),
                PRIMES_BELOW_10K,
                "threads {threads}"
            );
        }
    }

    #[test]
    fn thread_variant_handles_more_workers_than_cells() {
        for n in 0..20 {
            assert_eq!(
                parallel_threads(&mut table(n), 16),
                serial(&mut table(n)),
                "n {n}"
            );
        }
    }

    #[test]
    fn rayon_variant_agrees_with_serial() {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(4)
            .build()
            .expect("pool");
        assert_eq!(
            pool.install(|| parallel_rayon(&mut table(10_000))),
            PRIMES_BELOW_10K
        );
        for n in 0..20 {
            assert_eq!(parallel_rayon(&mut table(n)), serial(&mut table(n)), "n {n}");
        }
    }

    #[test]
    fn all_variants_leave_the_same_composite_table() {
        let mut a = table(5_000);
        let mut b = table(5_000);
        let mut c = table(5_000);
        serial(&mut a);
        parallel_threads(&mut b, 6);
        parallel_rayon(&mut c);
        assert_eq!(a[2..], b[2..]);
        assert_eq!(a[2..], c[2..]);
    }

    #[test]
    fn blocks_cover_the_table_once() {
        assert_eq!(block_starts(100, 4), vec![0, 25, 50, 75]);
        assert_eq!(block_starts(10, 3), vec![0, 3, 6]);
        assert_eq!(block_starts(3, 8), vec![0; 8]);
    }
}
