use std::{
    io::{self, IsTerminal},
    process,
};

use clap::Parser;
use memocalc::{
    cache::{CacheStats, ExpressionCache},
    config::EngineConfig,
    interpreter::{lexer::InvalidCharacterPolicy, parser::core::Strategy},
    session::Session,
    util::num::format_result,
};
use tracing_subscriber::EnvFilter;

/// memocalc evaluates arithmetic expressions with `+ - * /`, parentheses and
/// prefix signs, caching every successful result.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Expression to evaluate. Starts an interactive session when omitted.
    expression: Option<String>,

    /// Parsing strategy: `descent` or `shunting-yard`.
    #[arg(short, long, env = "MEMOCALC_STRATEGY", default_value_t = Strategy::Descent)]
    strategy: Strategy,

    /// Disables result caching.
    #[arg(long)]
    no_cache: bool,

    /// Reports every invalid character instead of only the first one.
    #[arg(long)]
    collect_invalid: bool,

    /// Maximum depth of parentheses and prefix signs.
    #[arg(long, default_value_t = memocalc::interpreter::parser::core::MAX_NESTING)]
    max_nesting: usize,

    /// Rounds displayed results to this many decimals.
    #[arg(short, long)]
    precision: Option<usize>,

    /// Prints cache statistics after evaluating the expression.
    #[arg(long)]
    stats: bool,

    /// Prints statistics as JSON.
    #[arg(long, requires = "stats")]
    json: bool,
}

impl Args {
    fn config(&self) -> EngineConfig {
        let policy = if self.collect_invalid {
            InvalidCharacterPolicy::Collect
        } else {
            InvalidCharacterPolicy::First
        };

        let config = EngineConfig::default().with_strategy(self.strategy)
                                            .with_invalid_characters(policy)
                                            .with_max_nesting(self.max_nesting);
        if self.no_cache { config.without_cache() } else { config }
    }
}

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
                             .with_writer(io::stderr)
                             .init();

    let args = Args::parse();
    let cache = ExpressionCache::with_config(args.config());

    let Some(expression) = args.expression.as_deref() else {
        run_interactive(&cache, args.precision);
        return;
    };

    let code = match cache.evaluate(expression) {
        Ok(value) => {
            println!("Result: {}", format_result(value, args.precision));
            0
        },
        Err(e) => {
            eprintln!("{}: {e}", e.kind());
            1
        },
    };

    if args.stats {
        print_stats(&cache.stats(), args.json);
    }

    process::exit(code);
}

fn run_interactive(cache: &ExpressionCache, precision: Option<usize>) {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();

    if interactive {
        println!("memocalc: arithmetic expression calculator");
        println!("Type 'help' for commands, 'exit' or 'quit' to leave.");
        println!("{}", "-".repeat(40));
    }

    let session = Session::new(cache, stdin.lock(), io::stdout()).with_precision(precision);
    let session = if interactive { session } else { session.without_prompt() };

    if let Err(e) = session.run() {
        eprintln!("I/O error: {e}");
        process::exit(1);
    }
}

fn print_stats(stats: &CacheStats, json: bool) {
    if json {
        match serde_json::to_string_pretty(stats) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => eprintln!("Failed to render statistics: {e}"),
        }
        return;
    }

    println!("{stats}");
}
