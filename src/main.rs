//! Unique Password Generator - command line and HTTP front end

use std::env;
use std::process;
use std::sync::Arc;

use unique_pass_gen::cli::{self, Command};
use unique_pass_gen::{
    logging, web, GenerationOptions, InMemoryPasswordStore, PassGenError, PasswordGenerator,
    PasswordStore, ServerConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    unique_pass_gen::init()?;

    let command = match cli::parse_args(env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => exit_with(&e),
    };

    match command {
        Command::Help => cli::print_help(),
        Command::Generate { options, count } => {
            logging::setup_tracing();
            if let Err(e) = run_generate(&options, count) {
                exit_with(&e);
            }
        }
        Command::Serve { host, port } => {
            logging::setup_tracing();
            if let Err(e) = run_serve(host, port).await {
                exit_with(&e);
            }
        }
    }

    Ok(())
}

/// Serve the form and the JSON API until Ctrl-C
async fn run_serve(host: Option<String>, port: Option<u16>) -> unique_pass_gen::Result<()> {
    let mut config = ServerConfig::from_env()?;
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    // One store for the whole process, shared by every request
    let store: Arc<dyn PasswordStore> = Arc::new(InMemoryPasswordStore::new());
    web::serve(config, store).await
}

/// Print `count` distinct passwords, one per line
fn run_generate(options: &GenerationOptions, count: usize) -> unique_pass_gen::Result<()> {
    let config = ServerConfig::from_env()?;
    let generator = PasswordGenerator::with_config(
        Arc::new(InMemoryPasswordStore::new()),
        config.generator,
    );

    for _ in 0..count {
        println!("{}", generator.generate(options)?);
    }

    let stats = generator.get_metrics_snapshot();
    tracing::debug!(
        issued = stats.passwords_issued,
        collisions = stats.collisions,
        "Generation finished"
    );
    Ok(())
}

fn exit_with(err: &PassGenError) -> ! {
    if err.is_user_error() {
        eprintln!("❌ {}", err.user_message());
    } else {
        eprintln!("❌ Error: {}", err);
    }
    process::exit(1);
}
