use anyhow::Result;
use clap::Parser;
use rand::Rng;

use engine::{
    ecs::Stats, prelude::*, Bank, DoodadRecipe, ItemRecipe, MonsterRecipe,
    DEFAULT_AREA_HEIGHT, DEFAULT_AREA_WIDTH,
};

mod view;

pub const GAME_NAME: &str = "severed";

#[derive(Parser, Debug)]
#[command(name = GAME_NAME, about = "Run a zombie siege without a screen")]
struct Args {
    /// Seed for the area random number generator.
    #[arg(long)]
    seed: Option<String>,

    #[arg(
        long,
        default_value_t = DEFAULT_AREA_WIDTH,
        value_parser = clap::value_parser!(i32).range(1..)
    )]
    width: i32,

    #[arg(
        long,
        default_value_t = DEFAULT_AREA_HEIGHT,
        value_parser = clap::value_parser!(i32).range(1..)
    )]
    height: i32,

    /// Number of weapons lying around.
    #[arg(long, default_value_t = 1)]
    weapons: usize,

    /// Number of zombies to spawn.
    #[arg(long, default_value_t = 3)]
    monsters: usize,

    /// Stop after this many turns.
    #[arg(long, default_value_t = 100)]
    turns: usize,

    /// Log more, repeat for even more.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    let seed = args
        .seed
        .unwrap_or_else(|| format!("{:x}", rand::thread_rng().gen::<u32>()));
    log::info!("seed: {seed}");

    let bank = content();
    let mut area = Area::from_scratch(
        args.width,
        args.height,
        bank.doodad("wall")?,
    )?
    .with_seed(&seed);

    // Claim the message channel before anything can happen.
    let messages = Receiver::default();

    let player = area.spawn_player("survivor", Stats {
        health: 30,
        speed: 15,
        to_hit: 5,
        dodge: 2,
        damage: 2,
        ..Default::default()
    });
    if !area.enter(&player) {
        anyhow::bail!("No room for the player");
    }

    for _ in 0..args.weapons {
        let axe = area.item_from_recipe(bank.item("rusty axe")?)?;
        if !area.add_entity_randomly(&axe) {
            log::warn!("No room for more weapons");
            break;
        }
    }

    for _ in 0..args.monsters {
        let zombie = area.monster_from_recipe(&bank, bank.monster("zombie")?)?;
        if !area.add_entity_randomly(&zombie) {
            log::warn!("No room for more zombies");
            break;
        }
    }

    for _ in 0..args.turns {
        if area.scenario_status() == ScenarioStatus::Lost {
            break;
        }

        let action = view::choose_action(&area, &player);
        if !area.act(action) {
            area.act(PlayerAction::Wait);
        }

        for msg in messages.try_iter() {
            match msg {
                Msg::Message(channel, text) => {
                    println!("{:>4} [{channel}] {text}", area.turn())
                }
                other => log::debug!("{other:?}"),
            }
        }
    }

    println!();
    print!("{}", view::render(&area));
    println!(
        "Turn {}: {:?}, xp {}",
        area.turn(),
        area.scenario_status(),
        player.xp(&area)
    );

    Ok(())
}

/// Built-in content for the siege scenario.
fn content() -> Bank {
    let mut bank = Bank::default();
    bank.add_doodad(DoodadRecipe {
        id: "wall".into(),
        kind: "wall".into(),
        name: "stone wall".into(),
        icon: '#',
        transparent: false,
    });
    bank.add_item(ItemRecipe {
        id: "rusty axe".into(),
        kind: "weapon".into(),
        name: "rusty axe".into(),
        icon: '/',
        damage: 3,
        attack_cost: 15,
    });
    bank.add_monster(MonsterRecipe {
        id: "zombie".into(),
        kind: "normal melee".into(),
        name: "zombie".into(),
        icon: 'z',
        ai: "melee zombie".into(),
        stats: Stats {
            health: 6,
            speed: 10,
            movement_speed: 10,
            to_hit: 0,
            damage: 1,
            ..Default::default()
        },
        death_message: Some("The zombie falls apart.".into()),
        xp: 5,
        wields: Some("rusty axe".into()),
        ..Default::default()
    });
    bank
}
