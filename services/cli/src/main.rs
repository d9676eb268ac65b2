mod cli;
mod error;
mod render;
mod telemetry;

fn main() {
    if let Err(err) = cli::run() {
        eprintln!("applicatiefout: {err}");
        std::process::exit(1);
    }
}
