// Headless driver: plays a scripted page session against the controller on a
// simulated clock and prints every effect a browser host would apply.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::main();
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use serenity::prelude::*;
    use tracing::Level;

    pub(super) fn main() {
        let args: Vec<String> = std::env::args().collect();
        if args.len() >= 2 && (args[1] == "--help" || args[1] == "-h" || args[1] == "help") {
            print_help();
            return;
        }

        let verbose = args.iter().any(|a| a == "-v" || a == "--verbose");
        tracing_subscriber::fmt()
            .with_max_level(if verbose { Level::DEBUG } else { Level::INFO })
            .with_target(false)
            .init();

        let mut config = match flag_value(&args, "--config") {
            Some(path) => match std::fs::read_to_string(&path) {
                Ok(raw) => match PageConfig::from_json(&raw) {
                    Ok(cfg) => cfg,
                    Err(e) => {
                        eprintln!("{path}: {e}");
                        std::process::exit(2);
                    }
                },
                Err(e) => {
                    eprintln!("{path}: {e}");
                    std::process::exit(2);
                }
            },
            None => PageConfig::default(),
        };
        if let Some(seed) = flag_value(&args, "--seed") {
            match seed.parse::<u64>() {
                Ok(s) => config.rng_seed = Some(s),
                Err(_) => {
                    eprintln!("--seed expects an integer, got {seed}");
                    std::process::exit(2);
                }
            }
        }
        let width = flag_value(&args, "--width")
            .and_then(|w| w.parse::<f64>().ok())
            .unwrap_or(1280.0);

        run_session(config, width);
    }

    fn flag_value(args: &[String], flag: &str) -> Option<String> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .cloned()
    }

    fn print_help() {
        println!("serenity-sim (headless page session)");
        println!("usage:");
        println!("  cargo run -p serenity");
        println!("  cargo run -p serenity -- --seed 42 --width 640");
        println!("  cargo run -p serenity -- --config page.json -v");
        println!("  cargo run -p serenity -- --help");
    }

    fn demo_layout() -> PageLayout {
        PageLayout {
            sections: vec![
                (SectionId::Home, true),
                (SectionId::Guru, false),
                (SectionId::Personal, false),
                (SectionId::Blog, false),
            ],
            nav_buttons: SectionId::all().to_vec(),
            cards: vec![
                (CardKind::Personal, "Meditation Tracker".to_string()),
                (CardKind::Personal, "Yoga Journal".to_string()),
                (CardKind::Blog, "The Art of Mindful Breathing".to_string()),
            ],
            status_text: "Online".to_string(),
        }
    }

    fn run_session(config: PageConfig, width: f64) {
        let clock = ManualClock::new(ClockTime::new(9, 0));
        let mut ctl = match PageController::new(config, demo_layout(), Box::new(clock.clone())) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(2);
            }
        };

        report(0, "start", ctl.start(width));
        report(clock.now_ms(), "nav: guru", ctl.nav_clicked(1));
        report(clock.now_ms(), "typing", ctl.input_changed("How do I find calm?"));
        report(clock.now_ms(), "send", ctl.send_message());

        for _ in 0..8 {
            clock.advance(500);
            let fx = ctl.run_due();
            if !fx.is_empty() {
                report(clock.now_ms(), "timers", fx);
            }
        }

        report(clock.now_ms(), "nav: blog", ctl.nav_clicked(3));
        match ctl.card_action(CardId(2)) {
            Ok(fx) => report(clock.now_ms(), "read more", fx),
            Err(e) => eprintln!("{e}"),
        }
        report(
            clock.now_ms(),
            "scroll",
            ctl.intersection(CardId(2), IntersectionSample { is_intersecting: true, ratio: 0.4 }),
        );
        report(clock.now_ms(), "resize 640", ctl.handle_resize(640.0));
        report(clock.now_ms(), "teardown", ctl.teardown());

        match serde_json::to_string_pretty(&ctl.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("snapshot: {e}"),
        }
    }

    fn report(now_ms: u64, label: &str, fx: Vec<Effect>) {
        println!("[{now_ms:>6} ms] {label}");
        for e in fx {
            println!("           {e:?}");
        }
    }
}
