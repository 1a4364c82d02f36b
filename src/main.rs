use clap::Parser;
use gbff2tx::{Args, gbff2tx};
use log::{error, info};
use simple_logger::init_with_level;

fn main() {
    let start = std::time::Instant::now();
    let args = Args::parse();

    init_with_level(args.level).unwrap_or_else(|e| panic!("{}", e));
    info!("Starting gbff2tx with args: {}", args);

    gbff2tx(args).unwrap_or_else(|e| {
        error!("{}", e);
        std::process::exit(1);
    });

    info!("Elapsed time: {:.3?}", start.elapsed());
}
