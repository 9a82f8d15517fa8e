pub mod cli;
pub mod config;

use crate::config::Config;
use clap::App;
use lang::syntax::desugar::DesugarLevel;

fn main() {
    let args = App::new("lithium")
        .version("0.1.0")
        .about("Lithium scheme-family to JavaScript compiler")
        .args_from_usage(
            "-i, --repl        'Starts an interactive lithium shell'
            -a, --dump-ast     'Dumps the core AST instead of emitting JavaScript'
            -e, --expand-let   'Rewrites let forms into lambda applications before emitting'
            [INPUT]            'Compile file'",
        )
        .get_matches();

    let cfg = Config {
        desugar: match args.is_present("expand-let") {
            true => DesugarLevel::Full,
            false => DesugarLevel::Sequential,
        },
        dump_ast: args.is_present("dump-ast"),
    };

    if args.is_present("repl") {
        cli::cli_main::cli_main(cfg, None);
    } else {
        cli::cli_main::cli_main(cfg, args.value_of("INPUT").map(|e| e.to_owned()));
    }
}
