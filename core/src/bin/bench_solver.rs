//! Classifies every distinct four-rank hand and reports how long it took.

use make24_core::{Rank, solve, solve_all};
use web_time::Instant;

fn main() {
    let ranks = Rank::ALL.map(|rank| f64::from(rank.value()));
    let start = Instant::now();

    let mut hands = 0;
    let mut solvable = 0;
    let mut witnesses = 0;
    for (a, &first) in ranks.iter().enumerate() {
        for (b, &second) in ranks.iter().enumerate().skip(a) {
            for (c, &third) in ranks.iter().enumerate().skip(b) {
                for &fourth in ranks.iter().skip(c) {
                    let values = [first, second, third, fourth];
                    hands += 1;
                    if solve(&values).is_some() {
                        solvable += 1;
                        witnesses += solve_all(&values).len();
                    }
                }
            }
        }
    }

    let elapsed = start.elapsed();
    println!("hands:     {hands}");
    println!("solvable:  {solvable} ({:.1}%)", 100.0 * solvable as f64 / hands as f64);
    println!("witnesses: {witnesses}");
    println!("elapsed:   {elapsed:?}");
}
