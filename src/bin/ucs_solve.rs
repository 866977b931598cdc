//! Front-end: reads two layouts from stdin, solves with uniform-cost
//! search, and prints the solution path followed by the total cost
//! (`SPEC_FULL.md` §4.7, §6).

use std::io;
use std::process::ExitCode;

use swap_search::{read_two_layouts, Skeleton, UcsStrategy};
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

    let mut skeleton = Skeleton::new(UcsStrategy);
    match skeleton.solve(start, goal) {
        Ok(Some(path)) => {
            for layout in path.layouts() {
                println!("{}", layout.format());
            }
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

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use swap_search::read_two_layouts;

    #[test]
    fn reads_two_lines() {
        let input = Cursor::new("9 7 8\n7 8 9\n");
        let (start, goal) = read_two_layouts(input).unwrap();
        assert_eq!(start.format(), "9 7 8");
        assert_eq!(goal.format(), "7 8 9");
    }
}
