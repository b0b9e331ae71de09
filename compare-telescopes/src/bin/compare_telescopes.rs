//! Compare the imaging performance of two telescope and camera combinations
//!
//! Prints a share URL for the web calculator followed by either a one-line
//! summary per telescope (default) or a detailed breakdown (`--detail`).

use clap::Parser;
use compare_telescopes::args::Args;
use compare_telescopes::report;
use std::error::Error;
use std::process::ExitCode;

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    if args.formulas {
        print!("{}", report::formulas());
        return Ok(());
    }

    let catalog = if args.needs_catalog() {
        Some(args.load_catalog()?)
    } else {
        None
    };

    if let Some(catalog) = &catalog {
        if args.list {
            for line in catalog.list_lines() {
                println!("{line}");
            }
            return Ok(());
        }
        if args.json {
            println!("{}", catalog.to_json()?);
            return Ok(());
        }
    }

    print!("{}", report::render(args, catalog.as_ref())?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
