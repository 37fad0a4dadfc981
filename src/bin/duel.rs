// Partida contra um adversário externo pela entrada padrão.
// Cada linha é um lance na notação `d0-d4/d5`, ou um comando:
// `board`, `quit`. O motor responde `move <lance>` ou `resign`.

use amazonas::*;
use anyhow::{bail, Context, Result};
use std::io::{self, BufRead, Write};

struct Duel {
    player: Player,
}

impl Duel {
    fn respond(&mut self, out: &mut impl Write) -> Result<bool> {
        match self.player.make_move() {
            Some(mv) => {
                writeln!(out, "move {}", mv)?;
                Ok(true)
            }
            None => {
                writeln!(out, "resign")?;
                Ok(false)
            }
        }
    }

    fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut out = io::stdout().lock();

        if self.player.role() == Role::White && !self.respond(&mut out)? {
            return Ok(());
        }
        out.flush()?;

        for line in stdin.lock().lines() {
            let line = line?;
            let input = line.trim();
            match input {
                "" => continue,
                "quit" => break,
                "board" => write!(out, "{}", self.player.board())?,
                _ => {
                    let mv = Move::parse(self.player.role().other(), input)?;
                    // um lance inválido do adversário termina a sessão
                    self.player
                        .handle_opponent_move(mv)
                        .with_context(|| format!("opponent made an invalid move {}", input))?;
                    if !self.respond(&mut out)? {
                        break;
                    }
                }
            }
            out.flush()?;
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut config = EngineConfig::default();
    let mut role = Role::White;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut idx = 0;
    while idx < args.len() {
        let name = args[idx].as_str();
        let value = args.get(idx + 1).with_context(|| format!("missing value for {}", name))?;
        match name {
            "--role" => {
                role = match value.as_str() {
                    "white" | "W" => Role::White,
                    "black" | "B" => Role::Black,
                    other => bail!("unknown role {}", other),
                }
            }
            _ => {
                if !config.set_option(name, value)? {
                    bail!("unknown option {}", name);
                }
            }
        }
        idx += 2;
    }

    Duel { player: Player::new(role, &config) }.run()
}
