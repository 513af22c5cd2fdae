use std::process::ExitCode;

use buildr::{ProcessRunner, WebBundle, WebBundleOptions, logger};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "buildwebapp")]
#[command(about = "Build the web frontend with pnpm and zip dist/ into tmp/app.zip")]
struct Args {
    #[arg(long, help = "Verbose output")]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let bundle = WebBundle::new(WebBundleOptions::default());
    match bundle.run(&mut ProcessRunner::new(args.verbose)) {
        Ok(archive) => {
            println!("Build and zip completed: {}", archive.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
