//! Shared CLI plumbing: flag parsing, source loading, output formats.

use std::fs;
use std::io::{self, Read};
use std::process;

use whereabouts::{Frame, RegionIndex};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Options shared by the query commands.
pub struct QueryOptions {
    pub data_frame: Option<Frame>,
    pub invert_y: bool,
    pub in_view_box: bool,
    pub percent_impute: Option<f64>,
    pub format: OutputFormat,
    /// Non-flag arguments, in order.
    pub positional: Vec<String>,
}

/// Parse the flags every query command shares. Positionals (the SVG path,
/// coordinates, a region name) are collected in order; numeric-looking
/// arguments count as positionals so negative coordinates survive.
pub fn parse_query_options(args: &[String], usage: &str) -> QueryOptions {
    let mut options = QueryOptions {
        data_frame: None,
        invert_y: true,
        in_view_box: false,
        percent_impute: None,
        format: OutputFormat::Text,
        positional: Vec::new(),
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--frame" => {
                i += 1;
                if i < args.len() {
                    options.data_frame = Some(parse_frame(&args[i]).unwrap_or_else(|| {
                        eprintln!(
                            "Bad --frame '{}': expected x_min,y_min,x_max,y_max",
                            args[i]
                        );
                        process::exit(1);
                    }));
                }
            }
            "--no-invert-y" => {
                options.invert_y = false;
            }
            "--in-view-box" => {
                options.in_view_box = true;
            }
            "--impute" => {
                i += 1;
                if i < args.len() {
                    let percent: f64 = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Bad --impute '{}': expected a percentage", args[i]);
                        process::exit(1);
                    });
                    options.percent_impute = Some(percent);
                }
            }
            "--json" => {
                options.format = OutputFormat::Json;
            }
            "-h" | "--help" => {
                println!("{}", usage);
                process::exit(0);
            }
            "-" => {
                options.positional.push("-".to_string());
            }
            other if !other.starts_with('-') || other.parse::<f64>().is_ok() => {
                options.positional.push(other.to_string());
            }
            unknown => {
                eprintln!("Unknown option: {}", unknown);
            }
        }
        i += 1;
    }

    options
}

/// Parse a `x_min,y_min,x_max,y_max` frame spec.
pub fn parse_frame(spec: &str) -> Option<Frame> {
    let mut values = [0.0f64; 4];
    let mut count = 0;
    for part in spec.split(',') {
        if count == 4 {
            return None;
        }
        values[count] = part.trim().parse().ok()?;
        count += 1;
    }
    if count != 4 {
        return None;
    }
    Some(Frame::new(values[0], values[1], values[2], values[3]))
}

/// Read a source file, or stdin for `-`.
pub fn read_source(path: &str) -> String {
    if path == "-" {
        eprintln!("Reading SVG from stdin...");
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .expect("Failed to read from stdin");
        buffer
    } else {
        fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Failed to read {}: {}", path, e);
            process::exit(1);
        })
    }
}

/// Load and index an SVG source, exiting with a message on parse failure.
pub fn load_index(path: &str, options: &QueryOptions) -> RegionIndex {
    let source = read_source(path);
    RegionIndex::from_svg(&source, options.data_frame, options.invert_y).unwrap_or_else(|e| {
        eprintln!("Failed to parse {}: {}", path, e);
        process::exit(1);
    })
}

/// Fetch a required positional argument or die with the usage string.
pub fn require_positional<'a>(options: &'a QueryOptions, index: usize, what: &str, usage: &str) -> &'a str {
    options.positional.get(index).map(String::as_str).unwrap_or_else(|| {
        eprintln!("Error: {} required", what);
        eprintln!("{}", usage);
        process::exit(1);
    })
}
