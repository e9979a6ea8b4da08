//! Structural report of an SVG source.
//!
//! The extractor only reads the constrained region-map dialect. This
//! command parses the same source with usvg's full grammar and puts the
//! two views side by side, which is the quickest way to see why a region
//! is missing: the path has no id, hides in a nested group, or is drawn
//! with curves the dialect doesn't carry.

use std::collections::HashSet;
use std::process;

use whereabouts::PathExtractor;

use super::common;

const INSPECT_USAGE: &str = "Usage: whereabouts inspect <svg>";

/// Element counts and path ids collected from the full usvg tree.
#[derive(Default)]
struct TreeStats {
    groups: usize,
    paths: usize,
    images: usize,
    texts: usize,
    path_ids: Vec<String>,
}

/// Execute the inspect command.
pub fn cmd_inspect(args: &[String]) {
    let options = common::parse_query_options(args, INSPECT_USAGE);
    let path = common::require_positional(&options, 0, "SVG file", INSPECT_USAGE);
    let source = common::read_source(path);

    // Full-grammar view.
    let usvg_options = usvg::Options::default();
    let tree = usvg::Tree::from_str(&source, &usvg_options).unwrap_or_else(|e| {
        eprintln!("SVG parse error: {}", e);
        process::exit(1);
    });

    let mut stats = TreeStats::default();
    collect_group(tree.root(), &mut stats);

    println!("size: {}x{}", tree.size().width(), tree.size().height());
    println!(
        "elements: {} path(s), {} group(s), {} image(s), {} text(s)",
        stats.paths, stats.groups, stats.images, stats.texts
    );

    // The extractor's view of the same source.
    match PathExtractor::extract(&source) {
        Ok(drawing) => {
            println!("view box: {}", drawing.view_box);
            println!("captured regions: {}", drawing.regions.len());
            for region in &drawing.regions {
                let points: usize = region.outlines.iter().map(Vec::len).sum();
                println!("  {} ({} outline(s), {} points)", region.name, region.outlines.len(), points);
            }

            let captured: HashSet<&str> =
                drawing.regions.iter().map(|r| r.name.as_str()).collect();
            let missed: Vec<&str> = stats
                .path_ids
                .iter()
                .map(String::as_str)
                .filter(|id| !captured.contains(id))
                .collect();
            if !missed.is_empty() {
                println!("paths not captured: {}", missed.join(", "));
            }
        }
        Err(e) => println!("extractor: {}", e),
    }
}

/// Recursively collect counts and ids from a usvg group.
fn collect_group(group: &usvg::Group, stats: &mut TreeStats) {
    for child in group.children() {
        match child {
            usvg::Node::Group(g) => {
                stats.groups += 1;
                collect_group(g, stats);
            }
            usvg::Node::Path(p) => {
                stats.paths += 1;
                if !p.id().is_empty() {
                    stats.path_ids.push(p.id().to_string());
                }
            }
            usvg::Node::Image(_) => {
                stats.images += 1;
            }
            usvg::Node::Text(_) => {
                stats.texts += 1;
            }
        }
    }
}
