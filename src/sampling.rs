//! Random selection primitives for quiz and marathon generation.
//!
//! Both generators pick flashcards by rejection sampling: draw a random
//! index, redraw when it was already taken. The loops terminate only while
//! the number of requested cards stays within the remaining pool, so every
//! entry point checks that bound up front instead of relying on eventual
//! random success.

use color_eyre::eyre::ensure;
use color_eyre::Result;
use rand::Rng;

/// Pick `k` distinct indices in `0..pool_len`, in draw order.
pub fn sample_distinct(rng: &mut impl Rng, pool_len: usize, k: usize) -> Result<Vec<usize>> {
    ensure!(
        k <= pool_len,
        "cannot sample {k} distinct cards from a pool of {pool_len}"
    );

    let mut taken = vec![false; pool_len];
    let mut picked = Vec::with_capacity(k);
    while picked.len() < k {
        let idx = rng.gen_range(0..pool_len);
        if !taken[idx] {
            taken[idx] = true;
            picked.push(idx);
        }
    }

    Ok(picked)
}

/// Partition `per_day * total_days` indices of `0..pool_len` into
/// `total_days` disjoint groups, where `per_day = pool_len / total_days`.
///
/// The taken-bitmap is shared across all days, so no index lands in two
/// groups. The `pool_len % total_days` remainder stays unassigned.
pub fn partition_days(
    rng: &mut impl Rng,
    pool_len: usize,
    total_days: usize,
) -> Result<Vec<Vec<usize>>> {
    ensure!(total_days > 0, "a marathon needs at least one day");
    ensure!(
        pool_len >= total_days,
        "cannot spread {pool_len} cards over {total_days} days"
    );

    let per_day = pool_len / total_days;

    let mut taken = vec![false; pool_len];
    let mut days = Vec::with_capacity(total_days);
    for _ in 0..total_days {
        let mut day = Vec::with_capacity(per_day);
        while day.len() < per_day {
            let idx = rng.gen_range(0..pool_len);
            if !taken[idx] {
                taken[idx] = true;
                day.push(idx);
            }
        }
        days.push(day);
    }

    Ok(days)
}
