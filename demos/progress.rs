//! Three simulated file transfers rendered as concentric rings.
//!
//! Run with a font path to see the labels:
//! `cargo run --example progress -- /path/to/font.ttf`

use concentric::{Color, PixelCanvas, RingSet, RingSetConfig, RingSpec, DEFAULT_INTERVAL};
use rand::Rng;
use std::cell::Cell;
use std::rc::Rc;

/// One fake transfer: progress advances at a jittered rate and wraps at
/// 100%. The counter is owned by the two closures, shared through an `Rc`.
fn transfer(fill: Color, rate: f64, size: &'static str, name: &'static str) -> RingSpec {
    let progress = Rc::new(Cell::new(0.0_f64));
    let observed = Rc::clone(&progress);

    RingSpec::builder()
        .fill(fill)
        .progress(Box::new(move || {
            let mut rng = rand::rng();
            let next = progress.get() + rate * rng.random_range(0.5..1.5);
            progress.set(if next < 1.0 { next } else { 0.0 });
            Ok(progress.get())
        }))
        .info(Box::new(move || {
            Ok(format!(
                "{}% of {} {}",
                (observed.get() * 100.0).round() as u32,
                size,
                name
            ))
        }))
        .build()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut canvas = PixelCanvas::new(640, 640);
    canvas.set_background(Color::new(0x20, 0x20, 0x20));
    match std::env::args().nth(1) {
        Some(path) => canvas.set_font(std::fs::read(path)?)?,
        None => eprintln!("no font given; labels will be skipped (usage: progress <font.ttf>)"),
    }

    let mut rings = RingSet::new(canvas, RingSetConfig::default())?;
    rings
        .add_entry(transfer(
            Color::rgba(0xff, 0xff, 0x00, 0x80),
            0.0025,
            "256MB",
            "foobar.mkv",
        ))
        .add_entry(transfer(
            Color::rgba(0x66, 0xff, 0x00, 0x80),
            0.0015,
            "13MB",
            "production.sqlite3",
        ))
        .add_entry(transfer(
            Color::rgba(0x00, 0xff, 0xff, 0x80),
            0.002,
            "46MB",
            "memoria.pdf",
        ))
        .start(DEFAULT_INTERVAL);

    rings.show("concentric rings")?;
    Ok(())
}
