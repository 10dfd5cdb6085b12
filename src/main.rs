//! Skyways entry point
//!
//! The browser build is driven from JS through `skyways::web`. Natively this
//! flies one headless round on autopilot and prints a summary.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::RefCell;
    use std::rc::Rc;

    use clap::Parser;

    use skyways::AudioManager;
    use skyways::sim::{EventTopic, Game, GameEvent, GamePhase, autopilot_controls};

    #[derive(Parser, Debug)]
    #[command(name = "skyways", about = "Fly one round of Skyways on autopilot")]
    pub struct Args {
        /// Layout seed (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Simulated frames per second
        #[arg(long, default_value_t = 60.0)]
        fps: f32,

        /// Give up after this many simulated seconds
        #[arg(long, default_value_t = 120.0)]
        max_seconds: f32,
    }

    pub fn run() {
        let args = Args::parse();
        let seed = args.seed.unwrap_or_else(rand::random);
        if args.fps <= 0.0 {
            log::error!("--fps must be positive");
            std::process::exit(2);
        }
        let dt = 1.0 / args.fps;

        let mut game = Game::new(seed);
        let audio = AudioManager::new();

        let passes = Rc::new(RefCell::new(0u32));
        {
            let passes = passes.clone();
            game.subscribe(EventTopic::RingPassed, move |event| {
                if let GameEvent::RingPassed { ring_index, points } = event {
                    *passes.borrow_mut() += 1;
                    log::info!("Ring {} passed (+{})", ring_index + 1, points);
                }
            });
        }
        game.subscribe(EventTopic::GameEnded, |_| log::info!("Round over"));

        game.start();
        let mut elapsed = 0.0;
        while game.phase() == GamePhase::Playing && elapsed < args.max_seconds {
            let controls = autopilot_controls(game.state());
            game.state_mut().controls = controls;
            game.frame(dt, &audio);
            elapsed += dt;
        }
        if game.phase() != GamePhase::Ended {
            log::warn!("Round did not finish within {}s", args.max_seconds);
        }

        let summary = serde_json::json!({
            "seed": seed,
            "phase": game.phase().as_str(),
            "score": game.score(),
            "ringsPassed": game.rings_passed(),
            "totalRings": game.state().total_rings(),
            "ringEvents": *passes.borrow(),
            "seconds": elapsed,
        });
        println!("{}", summary);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser entry point is skyways::web::init
}
