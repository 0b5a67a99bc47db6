//! Wayfarer CLI entry point.

use std::env;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use wayfarer_runtime::{CliOptions, Console, Game, Server, ServerConfig};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,wayfarer=info".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let options = CliOptions::parse(args)?;

    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.show_version {
        println!("wayfarer {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = options.apply(ServerConfig::from_env()?)?;
    let game = Game::demo(config.seed)?;
    let keywords = game.vocabulary();
    let server = Server::start(game, config.clock.clone())?;

    {
        let name = options.name.as_deref().unwrap_or("traveler");
        let client = server.connect(name)?;
        Console::new(client)?.with_keywords(keywords).run()?;
    }

    let game = server.shutdown()?;
    if config.dump_world {
        println!("\x1b[1;36m=== World State ===\x1b[0m");
        print!("{}", game.summary());
    }
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mWayfarer\x1b[0m - Multi-user text adventure

\x1b[1mUSAGE:\x1b[0m
    wayfarer [OPTIONS]

\x1b[1mOPTIONS:\x1b[0m
    -h, --help           Print help information
    -V, --version        Print version information
    --name NAME          Your character's name (default: traveler)
    --frame-ms N         Wall-clock milliseconds per frame (default: 50)
    --time-scale X       Game seconds per wall second (default: 1.0)
    --seed N             World random seed (default: 42)
    --dump-world         Print a world summary on exit

\x1b[1mENVIRONMENT:\x1b[0m
    WAYFARER_FRAME_MS    Same as --frame-ms
    WAYFARER_TIME_SCALE  Same as --time-scale
    WAYFARER_SEED        Same as --seed
    RUST_LOG             Log filter (default: info,wayfarer=info)

\x1b[1mCOMMANDS:\x1b[0m
    look, inventory, take, drop, give, go, hide, say, wait,
    dig, bandage, attack, search, list, buy, value, sell
    quit                 Leave the game
    Ctrl+D               Leave the game
    Ctrl+C               Cancel current input"
    );
}
