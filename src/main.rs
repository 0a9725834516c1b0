use std::process;

fn main() {
    if let Err(error) = chronopath::cli::run() {
        eprintln!("{:?}", miette::Report::new(error));
        process::exit(1);
    }
}
