use std::process;

use clap::Parser;

use cache_lib::flags::SimArgs;
use cache_lib::run_wrapper;

fn main() {
    env_logger::init();
    let args = SimArgs::parse();

    match run_wrapper::run(&args.config(), &args.trace_file, args.policy()) {
        Ok(stats) => println!("{}", stats),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
