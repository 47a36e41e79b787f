use std::{io, process};
use clap::Parser;
use env_logger::Env;
use xyplot::Args;

fn main() {
    let args = Args::parse();

    let mut log_builder =
        env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    log_builder.format_module_path(false);
    if let Some(level) = args.log_level {
        log_builder.filter_level(level.to_level_filter());
    }
    log_builder.init();

    let stdout = io::stdout();
    if let Err(e) = xyplot::run(&args, &mut stdout.lock()) {
        eprintln!("error: {}", e);
        process::exit(e.exit_code());
    }
}
