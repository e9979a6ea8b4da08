//! whereabouts - which named region contains this point?
//!
//! Usage:
//!   whereabouts regions <svg>             List named regions
//!   whereabouts lookup <svg> <x> <y>      Locate one point
//!   whereabouts map <svg> <points-file>   Locate a whole file of points
//!   whereabouts center <svg> <name>       Print a region's center
//!   whereabouts inspect <svg>             Structural report of the SVG

use std::env;
use std::process;

mod cli;

fn print_usage() {
    println!("whereabouts - which named region contains this point?");
    println!();
    println!("Usage:");
    println!("  whereabouts regions <svg> [options]             List named regions");
    println!("  whereabouts lookup <svg> <x> <y> [options]      Locate one point");
    println!("  whereabouts map <svg> <points-file> [options]   Locate a file of x,y points");
    println!("  whereabouts center <svg> <name> [options]       Print a region's center");
    println!("  whereabouts inspect <svg>                       Structural report of the SVG");
    println!();
    println!("Options:");
    println!("  --frame x0,y0,x1,y1   Map outlines into this data frame");
    println!("  --no-invert-y         Keep the drawing's top-left y axis");
    println!("  --in-view-box         Query points are in drawing coordinates");
    println!("  --impute PCT          Assign missed points to the nearest region");
    println!("                        within PCT percent of the frame diagonal");
    println!("  --json                JSON output instead of text");
    println!();
    println!("Use '-' as <svg> to read from stdin.");
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("regions") => cli::cmd_regions(&args[1..]),
        Some("lookup") => cli::cmd_lookup(&args[1..]),
        Some("map") => cli::cmd_map(&args[1..]),
        Some("center") => cli::cmd_center(&args[1..]),
        Some("inspect") => cli::cmd_inspect(&args[1..]),
        Some("-h") | Some("--help") | None => print_usage(),
        Some(unknown) => {
            eprintln!("Unknown command: {}", unknown);
            print_usage();
            process::exit(1);
        }
    }
}
