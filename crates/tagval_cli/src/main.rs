#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;
mod error;

use crate::cmd::util::WireArgs;

#[derive(Parser)]
#[command(name = "tagval", about = "Tagged binary value encoding and inspection tools")]
struct Cli {
	#[command(flatten)]
	wire: WireArgs,
	/// Raise log verbosity (repeat for trace output).
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	verbose: u8,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Decode a file and print its value tree.
	Inspect(cmd::inspect::Args),
	/// Encode a JSON value description into the binary format.
	Encode(cmd::encode::Args),
	/// Summarize the node kinds in an encoded file.
	Info(cmd::info::Args),
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	if let Err(err) = run(cli) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run(cli: Cli) -> error::Result<()> {
	let config = cli.wire.config();

	match cli.command {
		Commands::Inspect(args) => cmd::inspect::run(args, config),
		Commands::Encode(args) => cmd::encode::run(args, config),
		Commands::Info(args) => cmd::info::run(args, config),
	}
}

fn init_tracing(verbose: u8) {
	let default = match verbose {
		0 => "tagval=warn",
		1 => "tagval=debug",
		_ => "tagval=trace",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
