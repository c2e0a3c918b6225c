use std::process::ExitCode;

use log::error;
use structopt::StructOpt;

use vdp2cycp::config::{Config, Opt};
use vdp2cycp::logging::logger;
use vdp2cycp::vdp2::Vdp2;

fn main() -> ExitCode {
    let opt = Opt::from_args();
    if let Err(err) = logger::init(Config::logger(&opt)) {
        eprintln!("Failed to initialize logger: {err}");
    }

    let config = match Config::new(&opt) {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            return ExitCode::from(2);
        }
    };

    for format in config.formats() {
        println!("{format}");
    }

    let mut vdp2 = Vdp2::new(*config.options());
    match vdp2.configure(config.formats()) {
        Ok(compilation) => {
            for screen in &compilation.screens {
                println!("{screen}");
            }

            println!();
            print!("{}", compilation.patterns);
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("Rejected ({}): {err}", err.code());
            ExitCode::FAILURE
        }
    }
}
