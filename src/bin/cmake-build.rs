use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use buildr::{BuildReport, NativeBuild, NativeOptions, ProcessRunner, logger};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "build")]
#[command(about = "Build the project using CMake")]
struct Args {
    #[arg(long, help = "Clean build directory before building")]
    clean: bool,

    #[arg(long, help = "Build in Release mode (default is Debug)")]
    release: bool,

    #[arg(long, help = "Verbose output")]
    verbose: bool,

    #[arg(long, help = "Parallel build jobs (default: number of CPUs)")]
    jobs: Option<usize>,

    #[arg(long, help = "CMake generator to use instead of the platform default")]
    generator: Option<String>,

    #[arg(long, help = "Configure preset from CMakePresets.json")]
    preset: Option<String>,

    #[arg(long, env = "BUILDR_PROJECT_ROOT", help = "Project root (default: current directory)")]
    project_root: Option<PathBuf>,
}

fn run(args: Args) -> anyhow::Result<BuildReport> {
    let project_root = match args.project_root {
        Some(root) => root,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };

    let options = NativeOptions::new(project_root)
        .clean(args.clean)
        .release(args.release)
        .jobs(args.jobs)
        .generator(args.generator)
        .preset(args.preset);

    let report = NativeBuild::new(options).run(&mut ProcessRunner::new(args.verbose))?;
    Ok(report)
}

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    match run(args) {
        Ok(report) => {
            println!("Build completed successfully in {} mode", report.build_type);
            println!("Build artifacts can be found in: {}", report.build_dir.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!("{:?}", e);
            match e.downcast_ref::<buildr::Error>() {
                Some(err) => eprintln!("{}", err.summary()),
                None => eprintln!("{:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}
