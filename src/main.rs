use organizr::cli::run_cli;
use organizr::config::Options;
use organizr::output::OutputFormatter;
use std::env;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut options = match Options::load(None) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    let unknown_keys = match options.apply_args(args) {
        Ok(unknown_keys) => unknown_keys,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    for key in unknown_keys {
        OutputFormatter::warning(&format!("Ignoring unrecognized option '{}'", key));
    }

    if let Err(e) = run_cli(&options) {
        eprintln!("Error: {}", e);
    }
}
