//! Trellis CLI

use trellisc::{init_tracing, parse_args, run, Command, USAGE};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();

    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };

    match command {
        Command::Help => println!("{USAGE}"),
        Command::Version => println!("trellis {}", env!("CARGO_PKG_VERSION")),
        command => {
            if let Err(err) = run(&command) {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
    }
}
