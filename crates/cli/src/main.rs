use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use floorplan::api::{
    AreaDiff, AreaId, Catalog, HoleId, ItemPlacement, LayerId, LineId, Point, Properties, Scene,
};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod store;

#[derive(Parser)]
#[command(name = "floorplan")]
#[command(about = "Edit floor-plan JSON files one command at a time")]
struct Cmd {
    /// Plan file to read and update
    #[arg(long, global = true, default_value = "plan.json")]
    plan: PathBuf,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Start an empty plan
    New {
        #[arg(long)]
        force: bool,
    },
    /// Draw a wall; crossings and overlaps are resolved
    Wall {
        #[arg(long, value_parser = parse_pair)]
        from: (f64, f64),
        #[arg(long, value_parser = parse_pair)]
        to: (f64, f64),
        #[arg(long, default_value = "wall")]
        kind: String,
    },
    /// Put a door or window on a wall
    Hole {
        #[arg(long)]
        line: u64,
        #[arg(long)]
        offset: f64,
        #[arg(long, default_value = "door")]
        kind: String,
    },
    /// Place a free-standing item
    Item {
        #[arg(long)]
        kind: String,
        #[arg(long, value_parser = parse_pair)]
        at: (f64, f64),
        #[arg(long, value_parser = parse_pair, default_value = "100,100")]
        size: (f64, f64),
        #[arg(long, default_value_t = 0.0)]
        rotation: f64,
    },
    /// Split a wall at a point on it
    Split {
        #[arg(long)]
        line: u64,
        #[arg(long, value_parser = parse_pair)]
        at: (f64, f64),
    },
    /// Remove a wall with its openings
    RemoveLine {
        #[arg(long)]
        line: u64,
    },
    /// Re-derive rooms from the walls
    Areas,
    /// Validate every layer
    Check,
    /// Print a JSON summary of the plan
    Report,
}

/// `"x,y"` → `(x, y)`.
fn parse_pair(s: &str) -> Result<(f64, f64), String> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got `{s}`"))?;
    let parse = |t: &str| {
        t.trim()
            .parse::<f64>()
            .map_err(|e| format!("bad number `{t}`: {e}"))
    };
    Ok((parse(a)?, parse(b)?))
}

fn point((x, y): (f64, f64)) -> Point {
    Point::new(x, y)
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    if let Action::New { force } = cmd.action {
        store::create(&cmd.plan, force)?;
        tracing::info!(plan = %cmd.plan.display(), "new plan");
        return Ok(());
    }
    let mut scene = store::load(&cmd.plan)?;
    let out = apply(&mut scene, &cmd.action)?;
    if out.changed {
        store::save(&cmd.plan, &scene)?;
    }
    if let Some(doc) = out.print {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    }
    Ok(())
}

/// What a command did to the scene.
struct Outcome {
    changed: bool,
    print: Option<serde_json::Value>,
}

impl Outcome {
    fn changed(print: serde_json::Value) -> Self {
        Self {
            changed: true,
            print: Some(print),
        }
    }

    fn read_only(print: serde_json::Value) -> Self {
        Self {
            changed: false,
            print: Some(print),
        }
    }
}

fn diff_json(diff: &AreaDiff) -> serde_json::Value {
    json!({"added": diff.added, "removed": diff.removed})
}

fn apply(scene: &mut Scene, action: &Action) -> Result<Outcome> {
    let cat = Catalog::standard();
    let props = Properties::new();
    let outcome = match action {
        Action::New { .. } => bail!("`new` does not operate on a loaded plan"),
        Action::Wall { from, to, kind } => {
            tracing::info!(?from, ?to, kind = kind.as_str(), "wall");
            let layer = scene.selected_layer_mut();
            let lines = layer.draw_wall(&cat, kind, point(*from), point(*to), &props)?;
            Outcome::changed(json!({ "lines": lines }))
        }
        Action::Hole { line, offset, kind } => {
            tracing::info!(line, offset, kind = kind.as_str(), "hole");
            let layer = scene.selected_layer_mut();
            let hole: HoleId = layer.place_hole(&cat, kind, LineId(*line), *offset, &props)?;
            Outcome::changed(json!({ "hole": hole }))
        }
        Action::Item {
            kind,
            at,
            size,
            rotation,
        } => {
            tracing::info!(kind = kind.as_str(), ?at, "item");
            let placement = ItemPlacement {
                at: point(*at),
                width: size.0,
                height: size.1,
                rotation: *rotation,
            };
            let item = scene.selected_layer_mut().place_item(&cat, kind, placement, &props)?;
            Outcome::changed(json!({ "item": item }))
        }
        Action::Split { line, at } => {
            tracing::info!(line, ?at, "split");
            let layer = scene.selected_layer_mut();
            let (first, second) = layer.split_wall(&cat, LineId(*line), point(*at))?;
            Outcome::changed(json!({ "lines": [first, second] }))
        }
        Action::RemoveLine { line } => {
            tracing::info!(line, "remove-line");
            let diff = scene.selected_layer_mut().remove_wall(&cat, LineId(*line))?;
            Outcome::changed(diff_json(&diff))
        }
        Action::Areas => {
            let diff = scene.selected_layer_mut().refresh_areas(&cat)?;
            tracing::info!(added = diff.added.len(), removed = diff.removed.len(), "areas");
            Outcome {
                changed: !diff.is_empty(),
                print: Some(diff_json(&diff)),
            }
        }
        Action::Check => {
            let mut problems = Vec::new();
            for layer in scene.layers() {
                for e in layer.validate().errors {
                    problems.push(format!("{}: {e}", layer.id));
                }
            }
            if !problems.is_empty() {
                for p in &problems {
                    tracing::warn!("{p}");
                }
                bail!("{} invariant violation(s)", problems.len());
            }
            Outcome::read_only(json!({ "valid": true }))
        }
        Action::Report => Outcome::read_only(report(scene)?),
    };
    Ok(outcome)
}

#[derive(Serialize)]
struct RoomRow {
    id: AreaId,
    vertices: usize,
    size: f64,
}

#[derive(Serialize)]
struct LayerRow<'a> {
    id: LayerId,
    name: &'a str,
    visible: bool,
    vertices: usize,
    lines: usize,
    holes: usize,
    items: usize,
    areas: Vec<RoomRow>,
}

fn report(scene: &Scene) -> Result<serde_json::Value> {
    let mut layers = Vec::new();
    for layer in scene.layers() {
        let mut areas = Vec::new();
        for area in layer.areas() {
            areas.push(RoomRow {
                id: area.id,
                vertices: area.vertices.len(),
                size: layer.area_size(area.id)?,
            });
        }
        layers.push(LayerRow {
            id: layer.id,
            name: &layer.name,
            visible: layer.visible,
            vertices: layer.vertices().count(),
            lines: layer.lines().count(),
            holes: layer.holes().count(),
            items: layer.items().count(),
            areas,
        });
    }
    Ok(json!({
        "version": floorplan::VERSION,
        "unit": scene.unit,
        "selected_layer": scene.selected_layer_id(),
        "layers": layers,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn run(scene: &mut Scene, args: &[&str]) -> Result<Outcome> {
        let mut argv = vec!["floorplan"];
        argv.extend_from_slice(args);
        let cmd = Cmd::try_parse_from(argv)?;
        apply(scene, &cmd.action)
    }

    #[test]
    fn pairs_parse_with_spaces_and_reject_junk() {
        assert_eq!(parse_pair("1.5, -2").unwrap(), (1.5, -2.0));
        assert!(parse_pair("3").is_err());
        assert!(parse_pair("a,b").is_err());
    }

    #[test]
    fn drawing_four_walls_reports_one_room() {
        let mut scene = Scene::new();
        for (from, to) in [("0,0", "400,0"), ("400,0", "400,300"), ("400,300", "0,300"), ("0,300", "0,0")] {
            let out = run(&mut scene, &["wall", "--from", from, "--to", to]).unwrap();
            assert!(out.changed);
        }
        let doc = report(&scene).unwrap();
        let rooms = doc["layers"][0]["areas"].as_array().unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0]["size"], json!(120000.0));
        assert!(run(&mut scene, &["check"]).is_ok());
        let again = run(&mut scene, &["areas"]).unwrap();
        assert!(!again.changed);
    }

    #[test]
    fn failing_command_is_reported_and_keeps_plan_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plan.json");
        store::create(&path, false).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let mut scene = store::load(&path).unwrap();
        let err = run(&mut scene, &["hole", "--line", "5", "--offset", "0.5"]);
        assert!(err.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn wall_then_split_then_remove() {
        let mut scene = Scene::new();
        run(&mut scene, &["wall", "--from", "0,0", "--to", "10,0"]).unwrap();
        let line = scene.selected_layer().lines().next().unwrap().id;
        let out = run(&mut scene, &["split", "--line", &line.0.to_string(), "--at", "4,0"]).unwrap();
        let halves = out.print.unwrap()["lines"].as_array().unwrap().clone();
        assert_eq!(halves.len(), 2);
        let first = halves[0].as_u64().unwrap().to_string();
        run(&mut scene, &["remove-line", "--line", &first]).unwrap();
        assert_eq!(scene.selected_layer().lines().count(), 1);
    }

    #[test]
    fn items_use_catalog_kinds() {
        let mut scene = Scene::new();
        run(&mut scene, &["item", "--kind", "table", "--at", "2,3", "--size", "120,80"]).unwrap();
        assert!(run(&mut scene, &["item", "--kind", "piano", "--at", "0,0"]).is_err());
        let item = scene.selected_layer().items().next().unwrap();
        assert_eq!((item.width, item.height), (120.0, 80.0));
    }
}
