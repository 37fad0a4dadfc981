// Motor Amazonas - partida motor contra motor
use amazonas::moves::legal_moves;
use amazonas::search::CutoffTest;
use amazonas::*;
use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = EngineConfig::default();
    let mut random_opening = 0usize;
    let mut seed: Option<u64> = None;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut idx = 0;
    while idx < args.len() {
        let name = args[idx].as_str();
        let value = args.get(idx + 1).with_context(|| format!("missing value for {}", name))?;
        match name {
            "--random-opening" => random_opening = value.parse()?,
            "--seed" => seed = Some(value.parse()?),
            _ => {
                if !config.set_option(name, value)? {
                    bail!("unknown option {}", name);
                }
            }
        }
        idx += 2;
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // abertura aleatória para variar as partidas
    let mut board = Board::new();
    let mut to_move = Role::White;
    for _ in 0..random_opening {
        let moves = legal_moves(&board, to_move);
        let Some(mv) = moves.choose(&mut rng) else { break };
        println!("{} {} (random)", to_move, mv);
        board.apply(mv);
        to_move = to_move.other();
    }

    let cutoff = CutoffTest::new(config.min_free_memory, config.search_time);
    let mut players = [
        Player::from_board(Role::White, &config, cutoff.clone(), board.clone()),
        Player::from_board(Role::Black, &config, cutoff, board),
    ];

    println!("{}", players[0].board());
    let game_start = Instant::now();
    let mut turn = to_move.index();

    loop {
        let role = players[turn].role();
        let Some(mv) = players[turn].make_move() else {
            println!("{} resigns", role);
            break;
        };
        println!("{} {}", role, mv);
        players[1 - turn]
            .handle_opponent_move(mv)
            .with_context(|| format!("engine produced an invalid move {}", mv))?;
        println!("{}", players[turn].board());
        turn = 1 - turn;
    }

    println!(
        "Game over after {} arrows in {:.1}s",
        players[0].board().marked_positions(),
        game_start.elapsed().as_secs_f64()
    );
    Ok(())
}
