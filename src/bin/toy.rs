//!
//! Two-state toy: train on a run-structured sequence and compare it
//! with the reversed sequence.
//!
use clap::Parser;
use dexter::{
    common::{sequence_to_string, univariate},
    hmm::mocks::mock_two_state,
    Result,
};
use log::info;

#[derive(Parser, Debug)]
#[clap(about)]
struct Opts {
    /// number of Baum-Welch iterations
    #[clap(short = 'n', default_value = "10")]
    n_iter: usize,
    /// training symbols
    #[clap(long, use_value_delimiter = true, value_delimiter = ',', default_value = "0,0,0,1,1,1")]
    symbols: Vec<usize>,
}

fn main() -> Result<()> {
    env_logger::init();
    let opts: Opts = Opts::parse();
    println!("# started_at={}", chrono::Local::now());
    println!("# opts={:?}", opts);

    let mut model = mock_two_state();
    let seq = univariate(&opts.symbols);
    let reversed: Vec<_> = seq.iter().rev().cloned().collect();

    for i in 0..opts.n_iter {
        model.train(&seq)?;
        info!("iter={} log_p={}", i, model.probability(&seq)?.to_log_value());
    }
    print!("{}", model);

    for s in [&seq, &reversed] {
        println!(
            "P({})\t{}",
            sequence_to_string(s),
            model.probability(s)?.to_value()
        );
    }
    let (path, p) = model.viterbi_best(&seq)?;
    println!("viterbi\t{:?}\t{}", path, p.to_value());

    println!("# finished_at={}", chrono::Local::now());
    Ok(())
}
