//! Front-end: reads two layouts from stdin, solves with A\*, and prints
//! only the total cost of the goal node (`SPEC_FULL.md` §4.7, §6).

use std::io;
use std::process::ExitCode;

use swap_search::{read_two_layouts, AStarStrategy, Skeleton};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> ExitCode {
    init_logging();

    let stdin = io::stdin();
    let (start, goal) = match read_two_layouts(stdin.lock()) {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut skeleton = Skeleton::new(AStarStrategy);
    match skeleton.solve(start, goal) {
        Ok(Some(path)) => {
            println!("{}", path.total_cost());
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("no solution found");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
