//! # whereabouts
//!
//! Point-to-named-region lookup over SVG region maps.
//!
//! An SVG drawing of named closed outlines (countries, counties, zones on
//! a floor plan) becomes a queryable index: hand it a point - in the
//! drawing's own coordinates or in your dataset's frame - and it answers
//! which region the point falls in. Points that miss every outline can
//! optionally be imputed to the nearest region within a tolerance given
//! as a percentage of the frame diagonal.
//!
//! ```
//! use whereabouts::{Point, RegionIndex};
//!
//! let svg = r#"<svg viewBox="0 0 100 100">
//! <path id="square" d="M 10,10 10,10 90,10 90,90 10,90 Z "/>
//! </svg>"#;
//!
//! let index = RegionIndex::from_svg(svg, None, false).unwrap();
//! assert_eq!(index.find_container(Point::new(50.0, 50.0), false, None), Some("square"));
//! assert_eq!(index.find_container(Point::new(5.0, 5.0), false, None), None);
//! assert_eq!(index.find_container(Point::new(5.0, 5.0), false, Some(10.0)), Some("square"));
//! ```

pub mod containment;
pub mod geometry;
pub mod index;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use containment::{point_in_polygon, polygon_boundary_distance};
pub use geometry::{Frame, Outline, Point};
pub use index::{QueryError, Region, RegionIndex};
pub use svg::{Drawing, PathExtractor, RawRegion, SvgError};
