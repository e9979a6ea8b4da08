//! Query commands: regions, lookup, map, center.

use std::fs;
use std::process;

use serde::Serialize;

use whereabouts::Point;

use super::common::{self, OutputFormat};

/// A point in JSON output format.
#[derive(Serialize)]
struct JsonPoint {
    x: f64,
    y: f64,
}

/// A region summary in JSON output format.
#[derive(Serialize)]
struct JsonRegion {
    name: String,
    outlines: usize,
    points: usize,
    center: JsonPoint,
}

/// One resolved point in JSON output format.
#[derive(Serialize)]
struct JsonBelonging {
    x: f64,
    y: f64,
    region: Option<String>,
}

const REGIONS_USAGE: &str =
    "Usage: whereabouts regions <svg> [--frame x0,y0,x1,y1] [--no-invert-y] [--json]";

/// Execute the regions command.
pub fn cmd_regions(args: &[String]) {
    let options = common::parse_query_options(args, REGIONS_USAGE);
    let path = common::require_positional(&options, 0, "SVG file", REGIONS_USAGE);
    let index = common::load_index(path, &options);

    eprintln!("Loaded {} region(s) from {}", index.len(), path);

    match options.format {
        OutputFormat::Text => {
            for region in index.regions() {
                let points: usize = region.outlines.iter().map(|o| o.len()).sum();
                let center = index.center_of(&region.name).expect("region is in the index");
                println!(
                    "{}  {} outline(s), {} points, center {:.2},{:.2}",
                    region.name,
                    region.outlines.len(),
                    points,
                    center.x,
                    center.y
                );
            }
        }
        OutputFormat::Json => {
            let summaries: Vec<JsonRegion> = index
                .regions()
                .iter()
                .map(|region| {
                    let center = index.center_of(&region.name).expect("region is in the index");
                    JsonRegion {
                        name: region.name.clone(),
                        outlines: region.outlines.len(),
                        points: region.outlines.iter().map(|o| o.len()).sum(),
                        center: JsonPoint { x: center.x, y: center.y },
                    }
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&summaries).expect("serializable"));
        }
    }
}

const LOOKUP_USAGE: &str = "Usage: whereabouts lookup <svg> <x> <y> [--frame x0,y0,x1,y1] \
[--no-invert-y] [--in-view-box] [--impute PCT] [--json]";

/// Execute the lookup command.
pub fn cmd_lookup(args: &[String]) {
    let options = common::parse_query_options(args, LOOKUP_USAGE);
    let path = common::require_positional(&options, 0, "SVG file", LOOKUP_USAGE);
    let x = parse_coordinate(common::require_positional(&options, 1, "x coordinate", LOOKUP_USAGE));
    let y = parse_coordinate(common::require_positional(&options, 2, "y coordinate", LOOKUP_USAGE));
    let index = common::load_index(path, &options);

    let region = index.find_container(
        Point::new(x, y),
        options.in_view_box,
        options.percent_impute,
    );

    match options.format {
        OutputFormat::Text => match region {
            Some(name) => println!("{}", name),
            None => println!("none"),
        },
        OutputFormat::Json => {
            let belonging = JsonBelonging { x, y, region: region.map(str::to_string) };
            println!("{}", serde_json::to_string(&belonging).expect("serializable"));
        }
    }
}

const MAP_USAGE: &str = "Usage: whereabouts map <svg> <points-file> [--frame x0,y0,x1,y1] \
[--no-invert-y] [--in-view-box] [--impute PCT] [--json]\n\n\
The points file holds one x,y pair per line; blank lines and lines \
starting with # are skipped.";

/// Execute the map command.
pub fn cmd_map(args: &[String]) {
    let options = common::parse_query_options(args, MAP_USAGE);
    let path = common::require_positional(&options, 0, "SVG file", MAP_USAGE);
    let points_path = common::require_positional(&options, 1, "points file", MAP_USAGE);
    let index = common::load_index(path, &options);

    let content = fs::read_to_string(points_path).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {}", points_path, e);
        process::exit(1);
    });

    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for (line_number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((x, y)) = line.split_once(',') else {
            eprintln!("{}:{}: expected 'x,y', got '{}'", points_path, line_number + 1, line);
            process::exit(1);
        };
        let (Ok(x), Ok(y)) = (x.trim().parse::<f64>(), y.trim().parse::<f64>()) else {
            eprintln!("{}:{}: expected 'x,y', got '{}'", points_path, line_number + 1, line);
            process::exit(1);
        };
        xs.push(x);
        ys.push(y);
    }

    let belongings = index
        .map_belongings(&xs, &ys, options.in_view_box, options.percent_impute)
        .expect("series built pairwise");

    let assigned = belongings.iter().filter(|b| b.is_some()).count();
    eprintln!("Mapped {} point(s), {} assigned", belongings.len(), assigned);

    match options.format {
        OutputFormat::Text => {
            for (i, belonging) in belongings.iter().enumerate() {
                println!("{},{}\t{}", xs[i], ys[i], belonging.unwrap_or("none"));
            }
        }
        OutputFormat::Json => {
            let rows: Vec<JsonBelonging> = belongings
                .iter()
                .enumerate()
                .map(|(i, belonging)| JsonBelonging {
                    x: xs[i],
                    y: ys[i],
                    region: belonging.map(str::to_string),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows).expect("serializable"));
        }
    }
}

const CENTER_USAGE: &str =
    "Usage: whereabouts center <svg> <name> [--frame x0,y0,x1,y1] [--no-invert-y] [--json]";

/// Execute the center command.
pub fn cmd_center(args: &[String]) {
    let options = common::parse_query_options(args, CENTER_USAGE);
    let path = common::require_positional(&options, 0, "SVG file", CENTER_USAGE);
    let name = common::require_positional(&options, 1, "region name", CENTER_USAGE);
    let index = common::load_index(path, &options);

    let center = index.center_of(name).unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(1);
    });

    match options.format {
        OutputFormat::Text => println!("{},{}", center.x, center.y),
        OutputFormat::Json => {
            let point = JsonPoint { x: center.x, y: center.y };
            println!("{}", serde_json::to_string(&point).expect("serializable"));
        }
    }
}

fn parse_coordinate(raw: &str) -> f64 {
    raw.parse().unwrap_or_else(|_| {
        eprintln!("Bad coordinate '{}': expected a number", raw);
        process::exit(1);
    })
}
