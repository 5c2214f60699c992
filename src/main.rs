#[cfg(test)]
#[macro_use]
extern crate approx;
use clap::Parser;
use dhmm::hmm::mocks::{mock_mood, MOOD_EMISSIONS};
use dhmm::prob::Prob;
use dhmm::HmmModel;
use log::info;
use serde::Serialize;

///
/// Infer the mood of a lecturer (0=good, 1=neutral, 2=bad)
/// from the kind of homework (0=easy, 1=difficult)
///
#[derive(Parser, Debug)]
struct Opts {
    /// comma separated observed symbols (default: 0,1,1,0)
    #[clap(short = 'e', long, value_delimiter = ',')]
    emissions: Vec<usize>,
    /// sample a sequence of this length from the model instead
    #[clap(long)]
    sample: Option<usize>,
    #[clap(long, default_value = "0")]
    seed: u64,
    /// calculate in log space
    #[clap(long)]
    log_space: bool,
    /// print the result as json
    #[clap(long)]
    json: bool,
}

///
/// Result of the demo. `P` is `f64` for raw probabilities or `Prob` in log space.
///
#[derive(Serialize, Debug, Clone, PartialEq)]
struct Report<P> {
    emissions: Vec<usize>,
    likelihood: P,
    likelihood_backward: P,
    states: Vec<usize>,
    states_prob: P,
}

impl<P: Serialize + std::fmt::Debug> Report<P> {
    fn print(&self, json: bool, to_value: impl Fn(&P) -> f64) -> serde_json::Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(self)?);
            return Ok(());
        }
        println!("emissions: {:?}", self.emissions);
        println!(
            "Likelihood of the observation sequence: {}",
            to_value(&self.likelihood)
        );
        println!("Likelihood (backward): {}", to_value(&self.likelihood_backward));
        println!(
            "Most likely sequence of hidden states: {:?} (p={})",
            self.states,
            to_value(&self.states_prob)
        );
        Ok(())
    }
}

fn report_raw(hmm: &HmmModel, emissions: Vec<usize>) -> dhmm::Result<Report<f64>> {
    let r = hmm.viterbi_with_table(&emissions)?;
    Ok(Report {
        likelihood: hmm.full_prob(&emissions)?,
        likelihood_backward: hmm.full_prob_backward(&emissions)?,
        states: r.path,
        states_prob: r.prob,
        emissions,
    })
}

fn report_log(hmm: &HmmModel, emissions: Vec<usize>) -> dhmm::Result<Report<Prob>> {
    let (states, states_prob) = hmm.viterbi_log(&emissions)?;
    Ok(Report {
        likelihood: hmm.full_prob_log(&emissions)?,
        likelihood_backward: hmm.full_prob_backward_log(&emissions)?,
        states,
        states_prob,
        emissions,
    })
}

fn emissions_of(hmm: &HmmModel, opts: &Opts) -> dhmm::Result<Vec<usize>> {
    let emissions = match opts.sample {
        Some(length) => {
            let h = hmm.sample(length, opts.seed)?;
            info!("sampled {}", h);
            h.emissions
        }
        None if opts.emissions.is_empty() => MOOD_EMISSIONS.to_vec(),
        None => opts.emissions.clone(),
    };
    Ok(emissions)
}

fn run(opts: &Opts) -> Result<(), Box<dyn std::error::Error>> {
    let hmm = mock_mood();
    info!("model\n{}", hmm);
    let emissions = emissions_of(&hmm, opts)?;
    if opts.log_space {
        report_log(&hmm, emissions)?.print(opts.json, |p| p.to_value())?;
    } else {
        report_raw(&hmm, emissions)?.print(opts.json, |&p| p)?;
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let opts: Opts = Opts::parse();
    println!("# started_at={}", chrono::Local::now());
    println!("# opts={:?}", opts);

    if let Err(err) = run(&opts) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }

    println!("# finished_at={}", chrono::Local::now());
}
