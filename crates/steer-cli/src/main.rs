//! `steer`: feed console commands line by line and print the HUD.
//!
//! Usage: `steer [SCRIPT] [--config FILE] [--dt SECONDS] [--frames N] [--json]`
//!
//! Each input line is typed into the console and submitted. After every
//! submission the world is advanced `--frames` times and the visible HUD
//! lines are printed. The run stops at end of input or after `exit`.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use steer_console::{hud_lines, Console, Outcome};
use steer_eval::{World, WorldConfig};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "steer", version)]
#[command(about = "Steer a simulated actor with console commands")]
struct Args {
    /// Script with one command per line; stdin when omitted
    script: Option<PathBuf>,

    /// World configuration (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds per simulated frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Frames simulated after each submission
    #[arg(long, default_value_t = 120)]
    frames: u32,

    /// Print one JSON object per submission
    #[arg(long)]
    json: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    ensure!(
        args.dt.is_finite() && args.dt > 0.0,
        "--dt must be a positive number of seconds, got {}",
        args.dt
    );

    let config = match &args.config {
        Some(path) => WorldConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => WorldConfig::default(),
    };

    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening script {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let mut world = World::new(&config);
    let stdout = io::stdout();
    run(input, &mut stdout.lock(), &mut world, &args)
}

/// Drive the console over every line of `input`, writing reports to `out`.
fn run(input: impl BufRead, out: &mut impl Write, world: &mut World, args: &Args) -> Result<()> {
    let mut console = Console::new();
    console.start_typing();

    for (number, line) in input.lines().enumerate() {
        let line = line.context("reading input")?;
        console.type_str(&line, world);
        if console.text().len() < line.len() {
            tracing::warn!(line = number + 1, "input truncated to printable ASCII within capacity");
        }

        let outcome = console.submit(world);
        tracing::info!(line = number + 1, ?outcome, "submitted");
        if !outcome.is_success() {
            // Nothing carries over into the next line.
            console.stop_typing(world);
            console.start_typing();
        }

        if !world.exit_requested {
            for _ in 0..args.frames {
                world.update(args.dt);
            }
        }

        report(out, &console, world, &line, outcome, args.json)?;
        if world.exit_requested {
            break;
        }
    }
    out.flush().context("flushing output")?;
    Ok(())
}

fn report(
    out: &mut impl Write,
    console: &Console,
    world: &World,
    line: &str,
    outcome: Outcome,
    json: bool,
) -> Result<()> {
    let session = console.pipeline().preview_session();
    let hud = hud_lines(world, session.arena(), console.preview_root());
    let diagnostics = console.submit_diagnostics();

    if json {
        let record = serde_json::json!({
            "input": line,
            "outcome": outcome,
            "diagnostics": diagnostics.as_slice(),
            "hud": hud,
        });
        writeln!(out, "{record}")?;
        return Ok(());
    }

    writeln!(out, "> {line}")?;
    for diagnostic in diagnostics {
        writeln!(out, "  error {diagnostic}")?;
    }
    for hud_line in hud {
        writeln!(out, "  {hud_line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(frames: u32, json: bool) -> Args {
        Args {
            script: None,
            config: None,
            dt: 1.0,
            frames,
            json,
        }
    }

    fn drive(script: &str, args: &Args) -> (World, String) {
        let mut world = World::default();
        let mut out = Vec::new();
        run(script.as_bytes(), &mut out, &mut world, args).expect("run");
        (world, String::from_utf8(out).expect("utf-8"))
    }

    #[test]
    fn test_text_report() {
        let (_, out) = drive("output : 1, 2\n", &args(0, false));
        assert_eq!(
            out,
            "> output : 1, 2\n  Output: v2 1.0000 2.0000\n  Stroke Count: 0\n  Follow: off, Draw: on\n"
        );
    }

    #[test]
    fn test_errors_are_reported_and_discarded() {
        let (world, out) = drive("1 2\n3\n", &args(0, false));
        assert!(out.contains("  error 2:Expected operator\n"));
        let output = world.output();
        assert_eq!((output.dim(), output.x()), (1, 3.0));
    }

    #[test]
    fn test_frames_advance_world() {
        let (world, _) = drive("move: 10\n", &args(60, false));
        assert!(world.actor.move_distance < 1e-3);
        assert!((world.actor.position[1] - 10.0).abs() < 1e-2);
    }

    #[test]
    fn test_exit_stops_reading() {
        let (world, out) = drive("exit\nmove: 5\n", &args(10, false));
        assert!(world.exit_requested);
        assert_eq!(world.actor.move_distance, 0.0);
        assert!(!out.contains("move: 5"));
    }

    #[test]
    fn test_json_report() {
        let (_, out) = drive("change: 2\n", &args(0, true));
        let record: serde_json::Value = serde_json::from_str(out.trim()).expect("json");
        assert_eq!(record["input"], "change: 2");
        assert_eq!(record["outcome"], "executed");
        assert_eq!(record["diagnostics"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn test_json_report_carries_diagnostics() {
        let (_, out) = drive("nope\n", &args(0, true));
        let record: serde_json::Value = serde_json::from_str(out.trim()).expect("json");
        assert_eq!(record["outcome"], "resolve_failed");
        assert_eq!(record["diagnostics"][0]["code"], 300);
        assert_eq!(record["diagnostics"][0]["message"], "Invalid identifier");
        assert_eq!(record["diagnostics"][0]["span"]["offset"], 0);
    }
}
