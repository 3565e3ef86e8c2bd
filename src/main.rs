#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use log::{info, warn};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use reversi::{
    cli::result_line, init_logging, run_session, serve_tcp, CliController, FallbackApi, GameApi,
    GameEngine, SessionSummary, Stub, TcpTransport,
};
#[cfg(feature = "std")]
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(author, version, about = "4x4 Reversi", long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Play both sides at this terminal on a local engine.
    Local,
    /// Host games over TCP, one fresh game per connection.
    Serve {
        #[arg(long, default_value = "127.0.0.1:7878")]
        bind: String,
    },
    /// Play against a host, continuing locally if it becomes unreachable.
    Connect {
        #[arg(long, default_value = "127.0.0.1:7878")]
        addr: String,
        /// Exit instead of switching to a local engine when the host is unreachable.
        #[arg(long)]
        no_fallback: bool,
    },
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Local => {
            let mut engine = GameEngine::new();
            let summary = play(&mut engine).await?;
            report(&summary);
        }
        Commands::Serve { bind } => {
            let listener = TcpListener::bind(&bind).await?;
            info!("Serving games on {}", listener.local_addr()?);
            serve_tcp(listener).await?;
        }
        Commands::Connect { addr, no_fallback } => {
            println!("Connecting to {}...", addr);
            let connected = TcpTransport::connect(&addr).await;
            if no_fallback {
                let mut stub = Stub::new(connected?);
                report(&play(&mut stub).await?);
                return Ok(());
            }
            let mut api = match connected {
                Ok(transport) => {
                    println!("Connected.");
                    FallbackApi::new(Stub::new(transport))
                }
                Err(e) => {
                    warn!("Could not reach {} ({}); playing offline", addr, e);
                    FallbackApi::offline()
                }
            };
            let summary = play(&mut api).await?;
            if api.is_offline() {
                println!("(played on the local engine)");
            }
            report(&summary);
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
async fn play(api: &mut dyn GameApi) -> anyhow::Result<SessionSummary> {
    let mut controller = CliController::new();
    let mut rng = SmallRng::from_rng(&mut rand::rng());
    let mut stdout = std::io::stdout();
    run_session(api, &mut controller, &mut rng, &mut stdout).await
}

#[cfg(feature = "std")]
fn report(summary: &SessionSummary) {
    if summary.finished {
        println!("\n{}", result_line(&summary.final_state));
    } else {
        println!("\nGame left unfinished after {} moves.", summary.moves_played);
    }
}
