use clap::{Parser, ValueEnum};
use log::info;

use mcnaughton_rs::compose::{compose_mv_terms, construct_mv_terms};
use mcnaughton_rs::eval::{evaluate_memoized, Valuation};
use mcnaughton_rs::formula::{build_ast_cached, SubformulaCache};
use mcnaughton_rs::logic::Lukasiewicz;
use mcnaughton_rs::network::{CReluNetwork, Layer};
use mcnaughton_rs::rational::ratio;
use mcnaughton_rs::synthesis::Strategy;

#[derive(Debug, Copy, Clone, ValueEnum)]
enum StrategyName {
    Scaled,
    FromPaper,
}

impl From<StrategyName> for Strategy {
    fn from(name: StrategyName) -> Self {
        match name {
            StrategyName::Scaled => Strategy::Scaled,
            StrategyName::FromPaper => Strategy::FromPaper,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Rational construction used for every neuron.
    #[arg(long, value_enum, default_value = "scaled")]
    strategy: StrategyName,

    /// Number of hidden layers.
    #[clap(long, value_name = "INT", default_value = "1")]
    hidden: usize,

    /// Grid resolution used to compare the term against the network.
    #[clap(long, value_name = "INT", default_value = "10")]
    steps: usize,

    /// Print the per-neuron terms.
    #[clap(long)]
    verbose: bool,
}

/// Computes `σ(x1 + x2 - 2·σ(x1 + x2 - 1))`, with a rescaled copy of `x1 + x2` in the first layer.
fn build_network(hidden: usize) -> color_eyre::Result<CReluNetwork> {
    let mut layers = vec![Layer::new(
        vec![vec![ratio(1, 2), ratio(1, 2)], vec![ratio(1, 1), ratio(1, 1)]],
        vec![ratio(0, 1), ratio(-1, 1)],
    )?];
    // Identity layers on [0, 1] to make the network deeper.
    for _ in 1..hidden {
        layers.push(Layer::new(
            vec![vec![ratio(1, 1), ratio(0, 1)], vec![ratio(0, 1), ratio(1, 1)]],
            vec![ratio(0, 1), ratio(0, 1)],
        )?);
    }
    layers.push(Layer::new(vec![vec![ratio(2, 1), ratio(-2, 1)]], vec![ratio(0, 1)])?);
    Ok(CReluNetwork::new(layers)?)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let net = build_network(args.hidden)?;
    info!("network with {} layers", net.layers().len());

    let terms = construct_mv_terms(&net, args.strategy.into())?;
    if args.verbose {
        for (layer, neurons) in terms.iter().enumerate() {
            for (neuron, term) in neurons.iter().enumerate() {
                println!("layer {} neuron {}: {}", layer, neuron + 1, term);
            }
        }
    }

    let term = compose_mv_terms(&net, terms)?;
    println!("term of {} characters", term.chars().count());
    if term.chars().count() <= 400 {
        println!("term = {}", term);
    }

    let mut cache = SubformulaCache::new();
    let (root, depth) = build_ast_cached(&term, &mut cache, 0)?;
    println!(
        "AST: depth {}, {} nodes as a tree, {} distinct subformulas",
        depth,
        root.size(),
        cache.len()
    );

    let steps = args.steps.max(1);
    let mut max_error: f64 = 0.0;
    for i in 0..=steps {
        for j in 0..=steps {
            let x = [i as f64 / steps as f64, j as f64 / steps as f64];
            let want = net.forward(&x)[0];
            let got = evaluate_memoized(&root, &Valuation::from_inputs(&x), &Lukasiewicz)?;
            max_error = max_error.max((got - want).abs());
        }
    }
    println!("max |term - network| over the grid = {:e}", max_error);

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
