//! Scripted tour of the Lineup core: log in, register a squad, open a
//! game, fill the roster, and run into every rejection on the way.
//!
//! Run with `cargo run -p five-a-side`. Receipts are printed as the
//! JSON bodies a transport layer would send; set `RUST_LOG=debug` to
//! watch the pipeline underneath them.

use std::sync::Arc;

use lineup::prelude::*;

/// Prints the receipt a client would see for one command outcome.
fn report(label: &str, result: Result<u64, &CommandError>) {
    match result {
        Ok(id) => {
            let ack = serde_json::to_string(&CommandAck::new(id)).expect("ack serializes");
            println!("{label:<28} {ack}");
        }
        Err(err) => {
            let body = serde_json::to_string(&err.to_body()).expect("body serializes");
            println!("{label:<28} {body}");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    // One registry, two handles: ours for login, the service's for
    // verification.
    let registry = Arc::new(TokenRegistry::new().with_account("coach", "whistle"));
    let service = LineupBuilder::new().build(Arc::clone(&registry));

    let token = registry.login("coach", "whistle").await?;
    let principal = service.identify(Some(&token)).await?;
    println!("logged in as {principal}\n");

    // The squad. Player names are hex-charset by rule.
    let squad = ["ace", "bead", "cafe", "dada", "f00d"];
    let mut player_ids = Vec::new();
    for name in squad {
        let id = service
            .create_player(
                Some(&token),
                CreatePlayer {
                    name: name.into(),
                    email: format!("{name}@example.com"),
                },
            )
            .await?;
        report(&format!("create_player {name}"), Ok(id.0));
        player_ids.push(id);
    }

    // A sixth player to bounce off the full roster later.
    let reserve = service
        .create_player(
            Some(&token),
            CreatePlayer {
                name: "deadbeef".into(),
                email: "reserve@example.com".into(),
            },
        )
        .await?;
    report("create_player deadbeef", Ok(reserve.0));

    let game_id = service
        .create_game(
            Some(&token),
            CreateGame {
                name: "Friday Five-a-Side".into(),
            },
        )
        .await?;
    report("create_game", Ok(game_id.0));
    println!();

    // First member in, then the same player again: the duplicate is
    // shown here because once the roster is full, the capacity rule
    // answers first and a re-add reports game_full instead.
    let echoed = service
        .add_member(Some(&token), AddMember { game_id, player_id: player_ids[0] })
        .await?;
    report(&format!("add_member {}", player_ids[0]), Ok(echoed.0));

    let err = service
        .add_member(Some(&token), AddMember { game_id, player_id: player_ids[0] })
        .await
        .expect_err("already on the roster");
    report("add_member (again)", Err(&err));

    for &player_id in &player_ids[1..] {
        let echoed = service
            .add_member(Some(&token), AddMember { game_id, player_id })
            .await?;
        report(&format!("add_member {player_id}"), Ok(echoed.0));
    }
    tracing::info!(%game_id, members = player_ids.len(), "roster filled");
    println!();

    // The remaining rejections, receipts included.
    let err = service
        .add_member(
            Some(&token),
            AddMember {
                game_id,
                player_id: reserve,
            },
        )
        .await
        .expect_err("roster is full");
    report("add_member (full)", Err(&err));

    let err = service
        .create_player(
            Some(&token),
            CreatePlayer {
                name: "ace".into(),
                email: "ace2@example.com".into(),
            },
        )
        .await
        .expect_err("name is taken");
    report("create_player (dup name)", Err(&err));

    let err = service
        .create_player(
            Some(&token),
            CreatePlayer {
                name: "zz-top".into(),
                email: "zz@example.com".into(),
            },
        )
        .await
        .expect_err("name is not hex");
    report("create_player (bad name)", Err(&err));

    let err = service
        .create_game(None, CreateGame { name: "gate-crash".into() })
        .await
        .expect_err("no credential");
    report("create_game (no token)", Err(&err));
    println!();

    // Final state, read back the way an admin surface would.
    let game = service.game(game_id).await?.expect("game exists");
    println!("{} [{}]", game.name, game_id);
    for member in game.members.iter() {
        let player = service.player(*member).await?.expect("member exists");
        println!("  {:<4} {} <{}>", player.id.0, player.name, player.email);
    }

    Ok(())
}
