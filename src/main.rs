use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use satpipe::client::process::SolverConfig;
use satpipe::client::SolverClient;
use satpipe::engine::varisat::VarisatEngine;
use satpipe::server::Session;
use satpipe::wire::{Lit, SolveStatus};

#[derive(Parser, Debug)]
#[command(name = "satpipe")]
#[command(about = "Incremental SAT solving over a process pipe")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the solver side of the protocol on stdin/stdout.
    Serve {
        #[arg(long, default_value = "varisat")]
        backend: String,
    },
    /// Spawn a child solver against this binary and run a short
    /// three-round incremental scenario.
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve { backend } => run_serve(&backend),
        Commands::Demo => run_demo(),
    }
}

fn run_serve(backend: &str) -> Result<()> {
    if backend != "varisat" {
        bail!("unknown backend: {}", backend);
    }
    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    let mut session = Session::new(stdin, stdout, VarisatEngine::new());
    // Serves rounds forever; the only way out is a fatal error.
    let err = match session.run() {
        Err(e) => e,
        Ok(never) => match never {},
    };
    eprintln!("satpipe: session ended: {}", err);
    std::process::exit(1)
}

fn run_demo() -> Result<()> {
    let program = std::env::current_exe()?;
    let config = SolverConfig {
        program: program.to_string_lossy().into_owned(),
        args: vec!["serve".to_string()],
    };
    let mut client = SolverClient::create(config)?;

    client.add_literal(Lit::new(1, true))?;
    client.add_literal(Lit::new(2, true))?;
    client.finish_clause()?;
    client.freeze(1)?;
    client.freeze(2)?;
    let status = client.solve()?;
    print_round(&client, status, 2)?;

    client.add_literal(Lit::new(1, false))?;
    client.finish_clause()?;
    let status = client.solve()?;
    print_round(&client, status, 2)?;

    client.add_literal(Lit::new(2, false))?;
    client.finish_clause()?;
    let status = client.solve()?;
    print_round(&client, status, 2)?;

    Ok(())
}

fn print_round(client: &SolverClient, status: SolveStatus, nvars: u32) -> Result<()> {
    println!("solution={:?}", status);
    if status == SolveStatus::Sat {
        for var in 1..=nvars {
            println!("{}: {}", var, client.get_value(var)?);
        }
    }
    Ok(())
}
