//! itemvault entry point
//!
//! Everything happens in [`cli::run`]; this only maps a startup failure to
//! exit code 1.

use itemvault::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
