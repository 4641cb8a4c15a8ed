//!
//! Sample sequences from a random model and re-train another random model
//! on them with EM.
//!
use clap::Parser;
use dexter::{
    em,
    hmm::{mocks::mock_random, TrainParams},
    utils::timer,
    Result,
};

#[derive(Parser, Debug)]
#[clap(about)]
struct Opts {
    #[clap(long, default_value = "3")]
    n_states: usize,
    /// vocabulary size of each emission dimension
    #[clap(long, use_value_delimiter = true, value_delimiter = ',', default_value = "4")]
    n_symbols: Vec<usize>,
    #[clap(short = 'l', long, default_value = "200")]
    length: usize,
    #[clap(short = 'N', long, default_value = "10")]
    n_seqs: usize,
    #[clap(short = 's', long, default_value = "0")]
    seed: u64,
    #[clap(long, default_value = "100")]
    max_iter: usize,
    #[clap(long)]
    min_improvement: Option<f64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let opts: Opts = Opts::parse();
    println!("# started_at={}", chrono::Local::now());
    println!("# n_threads={}", rayon::current_num_threads());
    println!("# opts={:?}", opts);

    let truth = mock_random(opts.n_states, &opts.n_symbols, opts.seed)?;
    let mut model = mock_random(opts.n_states, &opts.n_symbols, opts.seed + 1)?;
    let seqs = (0..opts.n_seqs as u64)
        .map(|i| truth.sample(opts.length, opts.seed + i).map(|h| h.to_sequence()))
        .collect::<Result<Vec<_>>>()?;

    let params = TrainParams::new(opts.max_iter, opts.min_improvement);
    print!("{}", params);
    let (r, t) = timer(|| em::train(&mut model, &seqs, &params));
    let r = r?;
    println!("# em t={}", t);

    for (i, lp) in r.log_probs.iter().enumerate() {
        println!("{}\t{}", i, lp);
    }
    println!(
        "log_p_true={}\tlog_p_infer={}\tn_iter={}\tconverged={}",
        truth.probability_parallel(&seqs)?.to_log_value(),
        r.last_log_prob(),
        r.n_iter,
        r.converged
    );
    println!("# true model\n{}", truth);
    println!("# inferred model\n{}", model);

    println!("# finished_at={}", chrono::Local::now());
    Ok(())
}
