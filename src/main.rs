//! dicecrawl - plays an automated encounter from the command line

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dicecrawl::{
    codec, Character, CharacterClass, CombatOutcome, CombatSession, CombatSystem, DiceType, Enemy,
    EnemyAi, EnemyType, GameConfig, GameRng, RandomSource,
};

/// Maximum rounds before the demo calls it a draw
const MAX_ROUNDS: u32 = 100;

/// Health fraction at which the demo player tries to run
const FLEE_THRESHOLD: f64 = 0.15;

/// Dice-driven roguelike combat demo
#[derive(Parser, Debug)]
#[command(name = "dicecrawl", version, about = "Play an automated dicecrawl encounter")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed (overrides configuration)
    #[arg(long)]
    seed: Option<u64>,

    /// Character class: warrior, mage or rogue
    #[arg(long)]
    class: Option<String>,

    /// Player name
    #[arg(long)]
    name: Option<String>,

    /// Dungeon floor used to scale enemies
    #[arg(long, default_value_t = 1)]
    floor: u32,

    /// Enemy types to fight (can be specified multiple times)
    #[arg(long = "enemy")]
    enemies: Vec<String>,

    /// Fight the floor boss instead
    #[arg(long)]
    boss: bool,

    /// Write the character to this JSON file after the fight
    #[arg(long)]
    save: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = GameConfig::load(args.config.as_deref())?;
    if args.debug {
        config.debug = true;
    }

    // Initialize tracing
    let default_filter = if config.debug {
        "dicecrawl=debug"
    } else {
        "dicecrawl=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let class = match args.class.as_deref() {
        Some(s) => match s.parse::<CharacterClass>() {
            Ok(class) => class,
            Err(()) => bail!("Unknown character class: {}", s),
        },
        None => config.player.class,
    };
    let name = args.name.unwrap_or_else(|| config.player.name.clone());

    let mut rng = match args.seed.or(config.seed) {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    info!(seed = rng.seed(), "starting encounter");

    let roster = build_roster(&args.enemies, args.floor, args.boss, &mut rng)?;
    let mut player = Character::new(&name, class);

    let mut session = CombatSession::new(
        CombatSystem::new(Box::new(rng)),
        EnemyAi::new(),
        config.combat.clone(),
    );
    session.start(&player, roster);
    for line in session.system().log().entries() {
        println!("{}", line);
    }

    let mut outcome = CombatOutcome::Ongoing;
    for round in 1..=MAX_ROUNDS {
        println!("\n-- Round {} --", round);

        let report = if player.stats.health_fraction() < FLEE_THRESHOLD {
            session.flee(&mut player)
        } else {
            session.take_turn(&mut player, DiceType::Combat, 0, 0)
        };

        println!("{}", report.player.message);
        for (_, result) in &report.enemies {
            println!("{}", result.message);
        }
        for message in &report.status_messages {
            println!("{}", message);
        }
        println!(
            "{}: {}/{} health",
            player.name, player.stats.health, player.stats.max_health
        );

        outcome = report.outcome;
        if outcome.is_over() {
            break;
        }
    }

    match outcome {
        CombatOutcome::Victory { gold, xp } => {
            println!("\nVictory! Earned {} gold and {} XP (level {})", gold, xp, player.level)
        }
        CombatOutcome::Defeat => println!("\n{} has fallen.", player.name),
        CombatOutcome::Fled => {
            let (gold, xp) = session.earned();
            println!(
                "\n{} lives to fight another day, keeping {} gold and {} XP.",
                player.name, gold, xp
            )
        }
        CombatOutcome::Ongoing | CombatOutcome::Inactive => {
            println!("\nThe fight ends in a stalemate.")
        }
    }

    if let Some(path) = args.save {
        let json = codec::to_json(&player)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "character saved");
    }

    Ok(())
}

fn build_roster(
    names: &[String],
    floor: u32,
    boss: bool,
    rng: &mut dyn RandomSource,
) -> Result<Vec<Enemy>> {
    if boss {
        return Ok(vec![Enemy::boss_for_floor(floor, rng)]);
    }
    if names.is_empty() {
        return Ok(vec![
            Enemy::for_floor(EnemyType::Goblin, floor, rng),
            Enemy::for_floor(EnemyType::Skeleton, floor, rng),
        ]);
    }

    let mut roster = Vec::with_capacity(names.len());
    for name in names {
        let Ok(enemy_type) = name.parse::<EnemyType>() else {
            bail!("Unknown enemy type: {}", name);
        };
        roster.push(Enemy::for_floor(enemy_type, floor, rng));
    }
    Ok(roster)
}
