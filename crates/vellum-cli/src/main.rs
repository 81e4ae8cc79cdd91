use clap::Parser;
use vellum_cli::{CliArgs, VellumCli};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    let result = match VellumCli::from_args("vellum", &args) {
        Ok(cli) => cli.run(args).await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
