//! Prize Wheel Spin Demo
//!
//! Replays a few spins at 60 FPS without a browser and prints each
//! segment crossing and the winner.
//!
//! Run with: `cargo run --example spin_demo`
//! Set `RUST_LOG=prize_wheel=trace` to see the engine's own events.

use prize_wheel::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), WheelError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prize_wheel=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WheelConfig::default().with_seed(2024);
    println!("Prize wheel with {} segments:", config.segments.len());
    for (i, segment) in config.segments.iter().enumerate() {
        println!("  {i}. {} ({})", segment.label, segment.color);
    }
    println!();

    let mut engine = SpinEngine::new(&config)?;
    let simulator = SpinSimulator::new();

    let mut now = 0.0;
    for round in 1..=3 {
        let transcript = simulator.run(&mut engine, now)?;
        let Some(run) = transcript.run else {
            println!("Round {round}: spin ignored");
            continue;
        };

        println!(
            "Round {round}: {:.1} deg -> {:.1} deg over {} frames, {} clicks",
            run.start_rotation,
            run.target_rotation,
            transcript.frames,
            transcript.tick_count()
        );
        if let Some(winner) = &transcript.winner {
            println!("  You won: {} (segment {})", winner.label, winner.index);
        }

        now = transcript
            .rotations
            .last()
            .map_or(now, |(t, _)| *t + 1_000.0);
    }

    let widget = WheelWidget::new(config)?;
    println!();
    println!("Rendered markup: {} bytes", widget.to_markup().render().len());
    Ok(())
}
