use std::sync::Arc;

use engine::config::store::{store_url, StoreProfile};
use engine::domain::dice::OsDieRoller;
use engine::domain::roster::Roster;
use engine::infra::redis::RedisSessionStore;
use engine::services::turn_flow::{start_game, RoundEnd};
use tokio_util::sync::CancellationToken;

mod telemetry;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let players: Vec<String> = std::env::args().skip(1).collect();
    let roster = match Roster::new(players) {
        Ok(roster) => roster,
        Err(e) => {
            eprintln!("❌ Usage: engine <player> <player> [player...]  ({e})");
            std::process::exit(2);
        }
    };

    let url = match store_url(StoreProfile::Prod) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let store = match RedisSessionStore::connect(&url).await {
        Ok(store) => store,
        Err(e) => {
            eprintln!("❌ Failed to connect to the session store: {e}");
            std::process::exit(1);
        }
    };

    println!("✅ Session store connected");
    println!("🎲 Starting round for: {}", roster.names().join(", "));

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let outcome = match start_game(
        Arc::new(store),
        Arc::new(OsDieRoller::new()),
        roster,
        cancel,
    )
    .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("❌ Failed to start the game: {e}");
            std::process::exit(1);
        }
    };

    for (place, player) in outcome.podium.iter().enumerate() {
        println!("🏆 #{}: {player}", place + 1);
    }
    println!("🔄 Turns played: {}", outcome.cycles_played);

    match outcome.end {
        RoundEnd::Decided { remaining } => {
            println!("🏁 Round over; {remaining} is the last player standing");
            Ok(())
        }
        RoundEnd::Cancelled => {
            println!("🛑 Round cancelled");
            Ok(())
        }
        RoundEnd::Faulted { error } => {
            eprintln!("❌ Round halted: {error}");
            std::process::exit(1);
        }
    }
}
