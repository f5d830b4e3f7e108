use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use mcnaughton_rs::eval::{evaluate, evaluate_memoized, Valuation};
use mcnaughton_rs::formula::{build_ast, build_ast_cached, SubformulaCache};
use mcnaughton_rs::logic::Lukasiewicz;
use mcnaughton_rs::random::{random_formula, Shape};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of formulas.
    #[arg(value_name = "INT", default_value = "1000")]
    n: usize,

    /// Maximal formula depth.
    #[clap(long, value_name = "INT", default_value = "8")]
    depth: usize,

    /// Number of distinct atoms.
    #[clap(long, value_name = "INT", default_value = "3")]
    atoms: usize,

    /// Random seed.
    #[clap(long, value_name = "INT", default_value = "42")]
    seed: u64,
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

    let names: Vec<String> = (1..=args.atoms.max(1)).map(|i| format!("x{}", i)).collect();
    let atoms: Vec<&str> = names.iter().map(String::as_str).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut plain_nodes = 0;
    let mut cache = SubformulaCache::new();
    let mut mismatches = 0;
    for _ in 0..args.n {
        let formula = random_formula(&mut rng, &atoms, &Shape::LUKASIEWICZ, args.depth);
        let inputs: Vec<f64> = (0..atoms.len()).map(|_| rng.random::<f64>()).collect();
        let valuation = Valuation::from_inputs(&inputs);

        let (plain, _) = build_ast(&formula, 0)?;
        let (shared, _) = build_ast_cached(&formula, &mut cache, 0)?;
        plain_nodes += plain.size();

        let a = evaluate(&plain, &valuation, &Lukasiewicz)?;
        let b = evaluate_memoized(&shared, &valuation, &Lukasiewicz)?;
        if a != b {
            mismatches += 1;
            println!("mismatch on {}: {} vs {}", formula, a, b);
        }
    }

    println!("{} formulas, {} tree nodes in total", args.n, plain_nodes);
    println!("cache: {} distinct subformulas", cache.len());
    println!("cache hits: {}", cache.hits());
    println!("cache misses: {}", cache.misses());
    println!("mismatches: {}", mismatches);

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
