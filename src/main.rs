//! Burger Stack headless demo
//!
//! Plays a full game with an autoplayer that occasionally grabs the wrong
//! ingredient, logging every signal the presentation layer would receive.
//! Run with `RUST_LOG=info` (or `debug` to see mismatches).

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use burger_stack::{
        GameEvent, Ingredient, IngredientCatalog, RoundPhase, RoundStateMachine, Settings,
    };
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    /// Chance the autoplayer stacks a wrong layer
    const MISTAKE_CHANCE: f64 = 0.1;
    /// Give up after this many submissions
    const MAX_SUBMISSIONS: u32 = 10_000;

    env_logger::init();
    log::info!("Burger Stack (demo) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::from_json(&std::fs::read_to_string(path)?)?,
        None => Settings::default(),
    };
    let mut player = match settings.seed {
        Some(seed) => Pcg32::seed_from_u64(seed ^ 0x5eed),
        None => Pcg32::from_rng(&mut rand::rng()),
    };

    let catalog = IngredientCatalog::standard();
    let mut game = RoundStateMachine::new(settings, catalog)?;
    game.start_round()?;

    let mut submissions = 0;
    while game.phase() == RoundPhase::InProgress && submissions < MAX_SUBMISSIONS {
        let Some(expected) = game.expected_next() else {
            break;
        };
        let pick = if player.random_bool(MISTAKE_CHANCE) {
            let pool: Vec<Ingredient> = game.catalog().drawable().collect();
            pool[player.random_range(0..pool.len())]
        } else {
            expected
        };
        game.submit(pick)?;
        submissions += 1;

        for event in game.drain_events() {
            match event {
                GameEvent::RoundStarted {
                    first_ingredient,
                    length,
                } => log::info!("New burger: {} layers, starts with {}", length, first_ingredient),
                GameEvent::Advanced { next_expected } => {
                    log::debug!("Layer ok, next {}", next_expected)
                }
                GameEvent::Mismatched { offending, index } => {
                    log::info!("Wrong layer {} at {}", offending, index)
                }
                GameEvent::RoundCompleted { score_delta } => {
                    log::info!("Burger done! +{}", score_delta)
                }
                GameEvent::GameCompleted { final_score } => {
                    log::info!("Game complete, final score {}", final_score)
                }
            }
        }
    }

    if game.phase() != RoundPhase::GameComplete {
        log::warn!("Autoplayer stopped after {} submissions", submissions);
    }
    println!(
        "phase={:?} score={} rounds={} submissions={}",
        game.phase(),
        game.score(),
        game.progress().rounds_completed,
        submissions
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
