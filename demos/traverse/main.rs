//! Command-line traverse.
//!
//! ```text
//! cargo run --example traverse
//! RUST_LOG=traverse=debug cargo run --example traverse
//! ```
//!
//! Prompts for a base point, then a bearing and distance per leg. After each
//! leg: `a`ccept draws the traverse, `f`lip reverses the last leg, `c`hange
//! re-enters it, `n`ext adds another leg, and `x` or an empty line cancels.
//!
//! Bearings are quadrant text (`N45°30'00"E`, `N45 30 E`) or `DDD.MMSS`.
//! Distances may carry a unit suffix: `100ft`, `250 lk`, `30.5m`.

use std::io::{self, BufRead, Write};

use traverse::error::CommitRejected;
use traverse::session::{
    AngleCapture, DistanceCapture, GeometryPersister, PointCapture, PreviewRenderer,
};
use traverse::units::parse_length;
use traverse::{Angle, AngleConvention, Point2, SessionConfig, TraverseError, TraverseSession};

/// Reads one trimmed line after printing `prompt`. Empty input, `x` or EOF cancel.
fn ask(prompt: &str) -> Option<String> {
    print!("\n> {prompt}");
    io::stdout().flush().ok()?;
    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line).ok()?;
    let line = line.trim();
    if read == 0 || line.is_empty() || line.eq_ignore_ascii_case("x") {
        None
    } else {
        Some(line.to_string())
    }
}

/// Keeps prompting until `parse` accepts the input or the user cancels.
fn ask_until<T>(prompt: &str, parse: impl Fn(&str) -> Result<T, String>) -> Option<T> {
    loop {
        let line = ask(prompt)?;
        match parse(&line) {
            Ok(value) => return Some(value),
            Err(reason) => println!("> {reason}"),
        }
    }
}

fn parse_point(text: &str) -> Result<Point2, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| "expected x,y".to_string())?;
    let x = x.trim().parse::<f64>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<f64>().map_err(|e| e.to_string())?;
    Ok(Point2::new(x, y))
}

fn parse_bearing(text: &str) -> Result<Angle, String> {
    if let Ok(value) = text.parse::<f64>() {
        return Angle::from_dms_decimal(value).map_err(|e| e.to_string());
    }
    Angle::from_bearing_str(text, AngleConvention::AZIMUTH).map_err(|e| e.to_string())
}

fn parse_distance(text: &str) -> Result<f64, String> {
    let (value, unit) = parse_length(text)?;
    Ok(unit.to_meters(value))
}

struct Console;

impl PointCapture for Console {
    fn request_base_point(&mut self) -> Option<Point2> {
        ask_until("Select base point (x,y): ", parse_point)
    }
}

impl AngleCapture for Console {
    fn request_angle(&mut self, _origin: Point2) -> Option<Angle> {
        ask_until("Bearing: ", parse_bearing)
    }
}

impl DistanceCapture for Console {
    fn request_distance(&mut self, _origin: Point2) -> Option<f64> {
        ask_until("Distance: ", parse_distance)
    }
}

struct ConsolePreview;

impl PreviewRenderer for ConsolePreview {
    fn show_preview(&mut self, coordinates: &[Point2]) {
        for (i, p) in coordinates.iter().enumerate() {
            println!(">   {i:>3}  E {:>12.3}  N {:>12.3}", p.x, p.y);
        }
    }

    fn clear_preview(&mut self) {}
}

struct ConsoleDrawing;

impl GeometryPersister for ConsoleDrawing {
    fn commit_polyline(&mut self, coordinates: &[Point2]) -> Result<(), CommitRejected> {
        if coordinates.len() < 2 {
            return Err(CommitRejected("a polyline needs two points".into()));
        }
        println!("> Drew polyline with {} vertices.", coordinates.len());
        Ok(())
    }
}

fn print_closure(session: &TraverseSession) {
    if let Some((distance, bearing)) = session.closure_text() {
        println!("> Closure: {distance} m  {bearing}");
    }
}

fn main() -> Result<(), TraverseError> {
    // Default: WARN for everything, INFO for traverse.
    // Override with RUST_LOG env var (e.g. RUST_LOG=traverse=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("traverse=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    println!("> === Traverse Utility ===");
    let mut session = TraverseSession::new(
        SessionConfig::default(),
        Console,
        Console,
        Console,
        ConsolePreview,
        ConsoleDrawing,
    );

    if session.start_traverse()?.is_cancelled() {
        return Ok(());
    }

    loop {
        print_closure(&session);
        let Some(choice) = ask("Continue? [Accept/Flip/Change/Next/x]: ") else {
            return Ok(());
        };
        let last = session.legs().len().saturating_sub(1);
        let result = match choice.to_ascii_lowercase().chars().next() {
            Some('a') => match session.draw() {
                Ok(()) => return Ok(()),
                Err(e) => Err(e),
            },
            Some('f') => session.flip_bearing(last).map(|bearing| {
                println!("> {}", bearing.to_bearing_string(AngleConvention::AZIMUTH));
            }),
            Some('c') => change_leg(&mut session, last),
            Some('n') => session.capture_leg().map(|_| ()),
            _ => {
                println!("> Unknown option.");
                Ok(())
            }
        };
        if let Err(e) = result {
            println!("> {e}");
        }
    }
}

fn change_leg(session: &mut TraverseSession, index: usize) -> Result<(), TraverseError> {
    let origin = session
        .coordinates()
        .get(index)
        .copied()
        .unwrap_or(session.base_point());
    let Some(bearing) = Console.request_angle(origin) else {
        return Ok(());
    };
    let Some(distance) = Console.request_distance(origin) else {
        return Ok(());
    };
    session.set_distance(index, distance)?;
    session.set_bearing(index, bearing)
}
