#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "buscodec", about = "Message-bus signature and value transcoding tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Sig {
		signature: String,
		#[arg(long)]
		json: bool,
	},
	Forward {
		#[arg(long)]
		sig: String,
		#[arg(long)]
		value: String,
	},
	Reverse {
		#[arg(long)]
		sig: String,
		#[arg(long)]
		value: String,
	},
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> buscodec::bus::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Sig { signature, json } => cmd::sig::run(&signature, json),
		Commands::Forward { sig, value } => cmd::forward::run(&sig, &value),
		Commands::Reverse { sig, value } => cmd::reverse::run(&sig, &value),
	}
}
