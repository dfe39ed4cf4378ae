use std::env;
use std::path::Path;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use trapper_battle::battle::catch::{
    calculate_shake_threshold, capture_probability, get_shake_threshold_description,
};
use trapper_battle::catalog::capture_device;
use trapper_battle::species::{random_wild_combatant, starter, STARTERS};
use trapper_battle::{
    BattleConfig, BattleOutcome, BattleResult, BattleSession, Player, Trainer, TurnRng,
};

const MAX_DEMO_TURNS: usize = 5;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("trapper_battle=info")),
        )
        .init();

    let config = match BattleConfig::load(Path::new("data/battle_config.ron")) {
        Ok(config) => config,
        Err(e) => {
            warn!(%e, "falling back to default battle config");
            BattleConfig::default()
        }
    };

    // An optional first argument seeds the battle for a reproducible run.
    let rng = match env::args().nth(1).map(|arg| arg.parse::<u64>()) {
        Some(Ok(seed)) => {
            info!(seed, "using seeded rng");
            TurnRng::from_seed(seed)
        }
        Some(Err(e)) => {
            println!("Seed must be a number: {}", e);
            return;
        }
        None => TurnRng::new_random(),
    };

    if let Err(e) = run_demo(config, rng) {
        println!("Demo aborted: {}", e);
    }
}

fn run_demo(config: BattleConfig, mut rng: TurnRng) -> BattleResult<()> {
    println!("{}", "=".repeat(70));
    println!("TRAPPER BATTLE - DEMO");
    println!("{}", "=".repeat(70));
    println!();

    println!("1. Creating a new player...");
    let mut player = Player::new("Demo Player");
    println!("   Player: {}", player.name);
    println!("   Starting money: ${}", player.money);
    println!("   Starting inventory: {:?}", player.inventory);
    println!();

    println!("2. Available starters:");
    for template in &STARTERS {
        println!("   - {}", template);
    }
    println!();

    if let Some(template) = starter("Flamepup") {
        player.add_combatant(template.instantiate()?);
    }
    println!("3. Chose starter: {}", player.party[0]);
    println!();

    let wild = random_wild_combatant(&mut rng)?;
    println!("4. A wild {} (Lv.{}) appeared! Type: {}", wild.name, wild.level, wild.element);
    println!();

    println!("5. Battle simulation:");
    let mut battle = BattleSession::start(&mut player, wild, rng)?.with_config(config);
    let mut turn = 1;
    while battle.outcome() == BattleOutcome::Ongoing && turn <= MAX_DEMO_TURNS {
        let snapshot = battle.snapshot();
        println!("\n   Turn {}:", turn);
        println!("   {}", snapshot.active_combatant);
        println!("   Wild {}", snapshot.opponent_combatant);

        let report = battle.attack(0)?;
        for line in &report.narration {
            println!("   > {}", line);
        }
        turn += 1;

        let opponent = battle.opponent();
        let weakened = opponent.current_health() * 10 < opponent.max_health() * 3;
        if weakened && battle.outcome() == BattleOutcome::Ongoing {
            println!("\n   Attempting to catch {} with Basic Trap...", opponent.name);
            if let Some(device) = capture_device("Basic Trap") {
                if let Ok(threshold) = calculate_shake_threshold(device, opponent) {
                    println!(
                        "   Catch chance: {} ({:.4}%)",
                        get_shake_threshold_description(threshold),
                        capture_probability(threshold) * 100.0
                    );
                }
            }
            match battle.attempt_capture("Basic Trap") {
                Ok(report) => {
                    for line in &report.narration {
                        println!("   > {}", line);
                    }
                }
                Err(e) => println!("   > {}", e),
            }
        }
    }
    let outcome = battle.outcome();
    drop(battle);
    println!();

    println!("6. Battle Results:");
    println!("   Battle outcome: {}", outcome);
    println!("   Party size: {}", player.party().len());
    println!("   Remaining Basic Traps: {}", player.item_count("Basic Trap"));
    println!("   Money: ${}", player.money);
    println!();

    println!("7. Party:");
    for (i, combatant) in player.party.iter().enumerate() {
        let status = if combatant.is_fainted() { "FAINTED" } else { "OK" };
        println!("   {}. {} - {}", i + 1, combatant, status);
    }
    println!();

    println!("{}", "=".repeat(70));
    println!("DEMO COMPLETE!");
    println!("{}", "=".repeat(70));
    Ok(())
}
