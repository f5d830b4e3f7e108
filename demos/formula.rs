use clap::{Parser, ValueEnum};

use mcnaughton_rs::eval::{evaluate, evaluate_memoized, Valuation};
use mcnaughton_rs::formula::{build_ast, build_ast_cached, level_order, SubformulaCache};
use mcnaughton_rs::logic::{Godel, Logic, Lukasiewicz, Product};

#[derive(Debug, Copy, Clone, ValueEnum)]
enum LogicName {
    Lukasiewicz,
    Godel,
    Product,
}

impl LogicName {
    fn logic(self) -> &'static dyn Logic {
        match self {
            LogicName::Lukasiewicz => &Lukasiewicz,
            LogicName::Godel => &Godel,
            LogicName::Product => &Product,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Formula in the fully parenthesized term grammar, e.g. "(A⇒(B⊕(¬A)))".
    #[arg(value_name = "FORMULA")]
    formula: String,

    /// Atom assignments, e.g. `A=0.7`.
    #[arg(short, long = "set", value_name = "ATOM=VALUE", value_parser = parse_assignment)]
    assignments: Vec<(String, f64)>,

    /// Semantics of the connectives.
    #[arg(long, value_enum, default_value = "lukasiewicz")]
    logic: LogicName,

    /// Share identical subformulas while parsing.
    #[clap(long)]
    cached: bool,

    /// Print the AST in level order.
    #[clap(long)]
    tree: bool,
}

fn parse_assignment(s: &str) -> Result<(String, f64), String> {
    let (atom, value) = s.split_once('=').ok_or_else(|| format!("expected ATOM=VALUE, got `{}`", s))?;
    let value: f64 = value.parse().map_err(|e| format!("bad value `{}`: {}", value, e))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("value {} is outside [0, 1]", value));
    }
    Ok((atom.to_string(), value))
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

    let valuation: Valuation = args.assignments.iter().cloned().collect();
    let logic = args.logic.logic();

    let value = if args.cached {
        let mut cache = SubformulaCache::new();
        let (root, depth) = build_ast_cached(&args.formula, &mut cache, 0)?;
        println!("depth = {}, size = {}", depth, root.size());
        println!(
            "cache: {} distinct subformulas, {} hits, {} misses",
            cache.len(),
            cache.hits(),
            cache.misses()
        );
        if args.tree {
            for (label, depth) in level_order(&root) {
                println!("{}{}", "  ".repeat(depth), label);
            }
        }
        evaluate_memoized(&root, &valuation, logic)?
    } else {
        let (root, depth) = build_ast(&args.formula, 0)?;
        println!("depth = {}, size = {}", depth, root.size());
        if args.tree {
            for (label, depth) in level_order(&root) {
                println!("{}{}", "  ".repeat(depth), label);
            }
        }
        evaluate(&root, &valuation, logic)?
    };
    println!("{} under {} = {}", args.formula, logic.name(), value);

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
