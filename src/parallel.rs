//! Row-parallel scheduling used by every per-pixel stage.
//!
//! Each stage is expressed as a map over independent image rows (each row task
//! owns a disjoint output slice) or as a fork/join over independent branches.
//! Both calls return only after every task has finished, which is the barrier
//! the dependent stage relies on.
//!
//! With the `parallel` feature the work is dispatched to rayon's pool;
//! without it the same closures run sequentially in row order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Run `task(y, row)` for every row of a row-major buffer with `width`
/// elements per row. Returns once all rows are processed.
pub fn for_each_row<T, F>(data: &mut [T], width: usize, task: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    if width == 0 || data.is_empty() {
        return;
    }
    debug_assert_eq!(data.len() % width, 0, "buffer is not a whole number of rows");

    #[cfg(feature = "parallel")]
    {
        data.par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| task(y, row));
    }
    #[cfg(not(feature = "parallel"))]
    {
        data.chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| task(y, row));
    }
}

/// Evaluate two independent computations and wait for both.
pub fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    #[cfg(feature = "parallel")]
    {
        rayon::join(a, b)
    }
    #[cfg(not(feature = "parallel"))]
    {
        (a(), b())
    }
}

/// Three-way variant of [`join`], used for per-channel Lab work.
pub fn join3<A, B, C, RA, RB, RC>(a: A, b: B, c: C) -> (RA, RB, RC)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    C: FnOnce() -> RC + Send,
    RA: Send,
    RB: Send,
    RC: Send,
{
    let (ra, (rb, rc)) = join(a, || join(b, c));
    (ra, rb, rc)
}
