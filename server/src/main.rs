use clap::Parser;
use server::session::{GameConfig, GameServer};

/// Main-method of the application.
/// Parses command-line arguments, initializes logging, then runs one game
/// session to completion.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Command line arguments
    #[derive(Parser, Debug)]
    #[clap(author, version, about)]
    struct Args {
        /// Server IP address to bind to
        #[clap(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
        /// Server port to listen on
        #[clap(short, long, default_value_t = shared::DEFAULT_PORT)]
        port: u16,
        /// Number of players required before the game starts
        #[clap(short = 'n', long, default_value_t = 2)]
        players: usize,
        /// Number of rounds to play
        #[clap(short, long, default_value_t = shared::NUM_ROUNDS)]
        rounds: u32,
        /// Wrong-guess budget per player per round
        #[clap(short, long, default_value_t = shared::MAX_GUESSES)]
        guesses: u8,
        /// Word-selection seed for reproducible games
        #[clap(short, long)]
        seed: Option<u64>,
    }

    let args = Args::parse();
    env_logger::init();

    let config = GameConfig {
        players: args.players,
        rounds: args.rounds,
        guess_budget: args.guesses,
        seed: args.seed,
    };

    let address = format!("{}:{}", args.host, args.port);
    let server = GameServer::bind(&address, config).await?;
    server.run().await
}
