//! Command-line front end.
//!
//! A small driver around the library for poking at scene files from a shell:
//! resolve a path, write a value through it, stamp a date, or print the
//! month grid the panel would show.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::calendar::CalendarProps;
use crate::engine::{Engine, Scene, WriteOutcome};
use crate::errors::ChronopathError;
use crate::graph::Value;
use crate::panel::MonthGrid;
use crate::resolve::Resolution;

#[derive(Debug, Parser)]
#[command(
    name = "chronopath",
    version,
    about = "Write date/time keyframes into a scene graph through textual property paths."
)]
pub struct ChronopathArgs {
    #[command(subcommand)]
    pub command: ArgsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ArgsCommand {
    /// Resolve a property path against a scene file and print the value.
    Resolve {
        /// The scene JSON file to walk.
        #[arg(long)]
        scene: PathBuf,
        /// The property path, e.g. 'objects["Cube"].location.0'.
        path: String,
    },
    /// Write a value through a property path and keyframe it.
    Set {
        /// The scene JSON file to edit.
        #[arg(long)]
        scene: PathBuf,
        /// The property path to write to.
        path: String,
        /// The value: a number, true/false, or a bare string.
        value: String,
        /// Timeline position for the keyframe.
        #[arg(long, default_value_t = 1)]
        frame: i64,
        /// Where to write the edited scene; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Convert a civil date/time to an epoch timestamp.
    Stamp {
        year: i32,
        month: u32,
        day: u32,
        #[arg(default_value_t = 0)]
        hour: u32,
        #[arg(default_value_t = 0)]
        minute: u32,
        #[arg(default_value_t = 0)]
        second: u32,
    },
    /// Print the month grid the calendar panel would show.
    Grid {
        year: i32,
        month: u32,
        #[arg(default_value_t = 1)]
        day: u32,
    },
}

pub fn run() -> Result<(), ChronopathError> {
    let args = ChronopathArgs::parse();

    match args.command {
        ArgsCommand::Resolve { scene, path } => {
            let engine = Engine::new(Scene::new(load_scene(&scene)?));
            match engine.resolve(&path) {
                Resolution::Resolved(slot) => {
                    println!("{}", slot.value().to_json());
                }
                Resolution::Unresolved => println!("unresolved: {path}"),
            }
        }

        ArgsCommand::Set {
            scene,
            path,
            value,
            frame,
            out,
        } => {
            let mut engine = Engine::new(Scene::new(load_scene(&scene)?).with_frame(frame));
            let outcome = engine.set_keyframe_with_path(&path, parse_value(&value));
            match outcome {
                WriteOutcome::Unresolved => println!("unresolved: {path}"),
                WriteOutcome::NotWritten => println!("not written: {path}"),
                WriteOutcome::Written { keyframed } => {
                    let suffix = if keyframed { " (keyframed)" } else { "" };
                    println!("\x1b[32mwritten\x1b[0m: {path}{suffix}");
                }
            }
            dump_scene(&engine.scene.root, out.as_deref())?;
        }

        ArgsCommand::Stamp {
            year,
            month,
            day,
            hour,
            minute,
            second,
        } => {
            let props = CalendarProps::new(year, month, day, hour, minute, second);
            println!("{}", props.timestamp()?);
        }

        ArgsCommand::Grid { year, month, day } => {
            let props = CalendarProps::new(year, month, day, 0, 0, 0);
            print_grid(&MonthGrid::build(&props));
        }
    }
    Ok(())
}

fn load_scene(path: &std::path::Path) -> Result<Value, ChronopathError> {
    let text = fs::read_to_string(path).map_err(|source| ChronopathError::SceneIo {
        path: path.display().to_string(),
        source,
    })?;
    let json: serde_json::Value =
        serde_json::from_str(&text).map_err(|source| ChronopathError::SceneJson {
            path: path.display().to_string(),
            source,
        })?;
    Ok(Value::from_json(&json))
}

fn dump_scene(root: &Value, out: Option<&std::path::Path>) -> Result<(), ChronopathError> {
    let rendered = serde_json::to_string_pretty(&root.to_json()).unwrap_or_default();
    match out {
        Some(path) => fs::write(path, rendered).map_err(|source| ChronopathError::SceneWrite {
            path: path.display().to_string(),
            source,
        }),
        None => {
            println!("{rendered}");
            Ok(())
        }
    }
}

// A bare value argument: number, bool, or string, in that order.
fn parse_value(text: &str) -> Value {
    if let Ok(number) = text.parse::<f64>() {
        return Value::Number(number);
    }
    match text {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(text.to_string()),
    }
}

fn print_grid(grid: &MonthGrid) {
    println!("\x1b[1m{} {}\x1b[0m", grid.title, grid.year);
    let headers: Vec<&str> = grid.day_headers.iter().map(String::as_str).collect();
    println!("  #  {}", headers.join(" "));
    for week in &grid.weeks {
        let cells: Vec<String> = week
            .days
            .iter()
            .map(|cell| {
                if cell.selected {
                    format!("\x1b[7m{:3}\x1b[0m", cell.day)
                } else if cell.in_month {
                    format!("{:3}", cell.day)
                } else {
                    format!("\x1b[2m{:3}\x1b[0m", cell.day)
                }
            })
            .collect();
        println!("w{:02} {}", week.iso_week, cells.join(" "));
    }
}
