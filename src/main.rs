//! Runs the naive vs. vectorized benchmark on two random 100×100-block matrices.

use blockmul::bench::{self, BenchConfig};
use blockmul::BLOCK_SIZE;

fn main() {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Err(err) = bench::run::<BLOCK_SIZE, _>(&BenchConfig::default(), &mut out) {
        eprintln!("benchmark aborted: {err}");
    }
}
