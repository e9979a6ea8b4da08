//! The region index: named outlines, the frame transform, membership and
//! nearest-region queries.
//!
//! Built once from a single source, read-only afterwards. Queries never
//! mutate, so a `RegionIndex` can be shared across threads freely.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{Frame, Outline, Point};
use crate::svg::{PathExtractor, SvgError};

/// A named region drawn as one or more closed outlines (a country with
/// islands is one region, several outlines).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub outlines: Vec<Outline>,
}

/// Error type for malformed query arguments. A point that simply misses
/// every region is not an error - that's a `None` result.
#[derive(Debug)]
pub enum QueryError {
    /// The two coordinate series of a batch query differ in length.
    LengthMismatch { xs: usize, ys: usize },
    /// An API that needs a specific region was given a name that isn't in
    /// the table.
    UnknownRegion(String),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::LengthMismatch { xs, ys } => {
                write!(f, "coordinate series differ in length: {} xs vs {} ys", xs, ys)
            }
            QueryError::UnknownRegion(name) => write!(f, "region '{}' doesn't exist", name),
        }
    }
}

impl std::error::Error for QueryError {}

/// Answers "which named region contains this point?" for points in either
/// the drawing's own frame or a caller-supplied data frame.
///
/// All stored outline coordinates live in one output frame: the data
/// frame when one is configured, otherwise the drawing frame. Table order
/// is source order, and it is the deterministic tie-break wherever
/// overlapping or equidistant regions compete.
#[derive(Debug, Clone)]
pub struct RegionIndex {
    view_box: Frame,
    data_frame: Option<Frame>,
    invert_y: bool,
    regions: Vec<Region>,
}

impl RegionIndex {
    /// Build an index from SVG source text.
    ///
    /// `data_frame` is the caller's coordinate extent; when given, every
    /// outline is rescaled into it at construction time. `invert_y` flips
    /// the y axis first - drawings put (0,0) at the top-left corner, most
    /// datasets at the bottom-left - and callers normally want `true`.
    pub fn from_svg(
        source: &str,
        data_frame: Option<Frame>,
        invert_y: bool,
    ) -> Result<Self, SvgError> {
        let drawing = PathExtractor::extract(source)?;
        let mut index = RegionIndex {
            view_box: drawing.view_box,
            data_frame,
            invert_y,
            regions: Vec::new(),
        };
        let regions = drawing
            .regions
            .into_iter()
            .map(|raw| Region {
                name: raw.name,
                outlines: raw
                    .outlines
                    .into_iter()
                    .map(|points| {
                        Outline::new(points.into_iter().map(|p| index.scale(p, false)).collect())
                    })
                    .collect(),
            })
            .collect();
        index.regions = regions;
        Ok(index)
    }

    /// Map a point between the drawing frame and the data frame.
    ///
    /// Forward (`reverse = false`) goes drawing → data; `reverse = true`
    /// goes the other way. With no data frame configured only the y-flip
    /// applies. Each axis rescales independently - when the two frames
    /// have different aspect ratios the distortion is deliberate.
    pub fn scale(&self, point: Point, reverse: bool) -> Point {
        let Some(data_frame) = self.data_frame else {
            if self.invert_y {
                return Point::new(point.x, self.view_box.y_min + self.view_box.y_max - point.y);
            }
            return point;
        };
        let (init, target) = if reverse {
            (data_frame, self.view_box)
        } else {
            (self.view_box, data_frame)
        };
        let mut point = point;
        if self.invert_y {
            point.y = init.y_min + init.y_max - point.y;
        }
        if init == target {
            return point;
        }
        Point::new(
            target.x_min + (point.x - init.x_min) / init.width() * target.width(),
            target.y_min + (point.y - init.y_min) / init.height() * target.height(),
        )
    }

    /// Name of the first region with an outline containing the point, or
    /// `None` when the point misses everything.
    ///
    /// `in_view_box` marks the point as being in the drawing's original
    /// coordinates rather than the output frame. `percent_impute`, when
    /// positive, assigns a missed point to the nearest region as long as
    /// its boundary distance stays within that percentage of the output
    /// frame's diagonal.
    pub fn find_container(
        &self,
        point: Point,
        in_view_box: bool,
        percent_impute: Option<f64>,
    ) -> Option<&str> {
        let point = if in_view_box { self.scale(point, true) } else { point };

        for region in &self.regions {
            if region.outlines.iter().any(|outline| outline.contains(point)) {
                return Some(&region.name);
            }
        }

        let percent = percent_impute.filter(|p| *p > 0.0)?;

        // Nearest region by boundary distance, ties to table order.
        let mut min_distance = f64::INFINITY;
        let mut closest = None;
        for region in &self.regions {
            for outline in &region.outlines {
                let distance = outline.boundary_distance(point);
                if distance < min_distance {
                    min_distance = distance;
                    closest = Some(region.name.as_str());
                }
            }
        }

        let diagonal = self.data_frame.unwrap_or(self.view_box).diagonal();
        if min_distance <= percent * diagonal / 100.0 {
            closest
        } else {
            None
        }
    }

    /// [`RegionIndex::find_container`] element-wise over two coordinate
    /// series. One result per input pair, input order preserved.
    pub fn map_belongings(
        &self,
        xs: &[f64],
        ys: &[f64],
        in_view_box: bool,
        percent_impute: Option<f64>,
    ) -> Result<Vec<Option<&str>>, QueryError> {
        if xs.len() != ys.len() {
            return Err(QueryError::LengthMismatch { xs: xs.len(), ys: ys.len() });
        }
        Ok(xs
            .iter()
            .zip(ys)
            .map(|(&x, &y)| self.find_container(Point::new(x, y), in_view_box, percent_impute))
            .collect())
    }

    /// Center of a named region: the mean of its outlines' vertex
    /// centroids, in output-frame coordinates.
    pub fn center_of(&self, name: &str) -> Result<Point, QueryError> {
        let region = self
            .regions
            .iter()
            .find(|region| region.name == name)
            .ok_or_else(|| QueryError::UnknownRegion(name.to_string()))?;
        let centers: Vec<Point> = region
            .outlines
            .iter()
            .filter(|outline| !outline.is_empty())
            .map(Outline::centroid)
            .collect();
        if centers.is_empty() {
            return Ok(Point::new(0.0, 0.0));
        }
        let n = centers.len() as f64;
        Ok(Point::new(
            centers.iter().map(|p| p.x).sum::<f64>() / n,
            centers.iter().map(|p| p.y).sum::<f64>() / n,
        ))
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn view_box(&self) -> Frame {
        self.view_box
    }

    pub fn data_frame(&self) -> Option<Frame> {
        self.data_frame
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl fmt::Display for RegionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegionIndex([")?;
        for (i, region) in self.regions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", region.name)?;
        }
        write!(f, "], view_box = {}", self.view_box)?;
        match self.data_frame {
            Some(frame) => write!(f, ", data_frame = {})", frame),
            None => write!(f, ", data_frame = none)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One square region with corners (10,10)..(90,90) in a 100x100 frame.
    const SQUARE: &str = r#"<svg viewBox="0 0 100 100">
<path id="square" d="M 10,10 10,10 90,10 90,90 10,90 Z "/>
</svg>"#;

    /// Two regions; "east" is drawn as two disjoint outlines.
    const TWO_REGIONS: &str = r#"<svg viewBox="0 0 200 100">
<path id="west" d="M 10,10 10,10 90,10 90,90 10,90 Z "/>
<path id="east" d="M 110,10 110,10 150,10 150,90 110,90 Z M 160,40 160,40 190,40 190,60 160,60 Z "/>
</svg>"#;

    fn plain_square() -> RegionIndex {
        RegionIndex::from_svg(SQUARE, None, false).unwrap()
    }

    #[test]
    fn contains_inside_point() {
        let index = plain_square();
        assert_eq!(index.find_container(Point::new(50.0, 50.0), false, None), Some("square"));
    }

    #[test]
    fn outside_point_without_impute_is_none() {
        let index = plain_square();
        assert_eq!(index.find_container(Point::new(5.0, 5.0), false, None), None);
        assert_eq!(index.find_container(Point::new(5.0, 5.0), false, Some(0.0)), None);
        assert_eq!(index.find_container(Point::new(5.0, 5.0), false, Some(-3.0)), None);
    }

    #[test]
    fn impute_assigns_nearby_point() {
        let index = plain_square();
        // (5,5) sits sqrt(50) ~ 7.07 from the square's nearest corner;
        // 10% of the 100x100 diagonal is ~14.14.
        assert_eq!(index.find_container(Point::new(5.0, 5.0), false, Some(10.0)), Some("square"));
    }

    #[test]
    fn impute_respects_tolerance() {
        let index = plain_square();
        // 1% of the diagonal is ~1.41, well under the 7.07 gap.
        assert_eq!(index.find_container(Point::new(5.0, 5.0), false, Some(1.0)), None);
    }

    #[test]
    fn impute_is_monotonic() {
        let index = plain_square();
        let point = Point::new(5.0, 5.0);
        let mut seen_region = false;
        for percent in [0.0, 1.0, 2.0, 5.0, 10.0, 50.0] {
            let result = index.find_container(point, false, Some(percent));
            if seen_region {
                // Once a tolerance admits the point, larger ones must too.
                assert_eq!(result, Some("square"), "regressed at {}%", percent);
            }
            seen_region = result.is_some();
        }
    }

    #[test]
    fn multi_outline_region_contains_both_parts() {
        let index = RegionIndex::from_svg(TWO_REGIONS, None, false).unwrap();
        assert_eq!(index.find_container(Point::new(130.0, 50.0), false, None), Some("east"));
        assert_eq!(index.find_container(Point::new(175.0, 50.0), false, None), Some("east"));
        assert_eq!(index.find_container(Point::new(50.0, 50.0), false, None), Some("west"));
    }

    #[test]
    fn invert_y_flips_outlines() {
        // With the flip on, a square drawn near the top of the picture
        // contains points near the top of the y-up frame.
        let svg = r#"<svg viewBox="0 0 100 100">
<path id="top" d="M 10,10 10,10 90,10 90,30 10,30 Z "/>
</svg>"#;
        let index = RegionIndex::from_svg(svg, None, true).unwrap();
        assert_eq!(index.find_container(Point::new(50.0, 80.0), false, None), Some("top"));
        assert_eq!(index.find_container(Point::new(50.0, 20.0), false, None), None);
    }

    #[test]
    fn data_frame_rescales_outlines() {
        // 100x100 drawing mapped onto a 10x10 data frame.
        let frame = Frame::new(0.0, 0.0, 10.0, 10.0);
        let index = RegionIndex::from_svg(SQUARE, Some(frame), false).unwrap();
        assert_eq!(index.view_box(), Frame::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(index.data_frame(), Some(frame));
        assert_eq!(index.find_container(Point::new(5.0, 5.0), false, None), Some("square"));
        assert_eq!(index.find_container(Point::new(0.5, 0.5), false, None), None);
    }

    #[test]
    fn in_view_box_queries_use_drawing_coordinates() {
        // y-flip on, no data frame: a view-box point is flipped into the
        // output frame before testing.
        let svg = r#"<svg viewBox="0 0 100 100">
<path id="top" d="M 10,10 10,10 90,10 90,30 10,30 Z "/>
</svg>"#;
        let index = RegionIndex::from_svg(svg, None, true).unwrap();
        // (50,20) in drawing coordinates is inside the drawn band.
        assert_eq!(index.find_container(Point::new(50.0, 20.0), true, None), Some("top"));
        assert_eq!(index.find_container(Point::new(50.0, 80.0), true, None), None);
    }

    #[test]
    fn scale_round_trips_through_data_frame() {
        let frame = Frame::new(-10.0, 5.0, 30.0, 25.0);
        let index = RegionIndex::from_svg(SQUARE, Some(frame), true).unwrap();
        let p = Point::new(37.5, 81.25);
        let q = index.scale(index.scale(p, false), true);
        assert!((q.x - p.x).abs() < 1e-9);
        assert!((q.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn batch_matches_single_queries() {
        let index = RegionIndex::from_svg(TWO_REGIONS, None, false).unwrap();
        let xs = [50.0, 130.0, 175.0, 5.0];
        let ys = [50.0, 50.0, 50.0, 5.0];
        let batch = index.map_belongings(&xs, &ys, false, Some(3.0)).unwrap();
        assert_eq!(batch.len(), xs.len());
        for (i, belonging) in batch.iter().enumerate() {
            assert_eq!(
                *belonging,
                index.find_container(Point::new(xs[i], ys[i]), false, Some(3.0)),
                "batch and single disagree at {}",
                i
            );
        }
    }

    #[test]
    fn batch_length_mismatch_errors() {
        let index = plain_square();
        let result = index.map_belongings(&[1.0, 2.0], &[1.0], false, None);
        assert!(matches!(result, Err(QueryError::LengthMismatch { xs: 2, ys: 1 })));
    }

    #[test]
    fn empty_table_degrades_to_none() {
        let index = RegionIndex::from_svg("<svg viewBox=\"0 0 10 10\">\n</svg>", None, true).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.find_container(Point::new(5.0, 5.0), false, None), None);
        // Even with a huge impute tolerance there is nothing to assign to.
        assert_eq!(index.find_container(Point::new(5.0, 5.0), false, Some(1000.0)), None);
    }

    #[test]
    fn center_of_square() {
        let index = plain_square();
        let center = index.center_of("square").unwrap();
        assert!((center.x - 50.0).abs() < 1e-12);
        assert!((center.y - 50.0).abs() < 1e-12);
    }

    #[test]
    fn center_of_unknown_region_errors() {
        let index = plain_square();
        let result = index.center_of("atlantis");
        assert!(matches!(result, Err(QueryError::UnknownRegion(name)) if name == "atlantis"));
    }

    #[test]
    fn display_lists_regions_and_frames() {
        let index = RegionIndex::from_svg(TWO_REGIONS, None, false).unwrap();
        assert_eq!(
            index.to_string(),
            "RegionIndex([west, east], view_box = (0 0 200 100), data_frame = none)"
        );
    }

    #[test]
    fn each_index_owns_its_table() {
        // Two indexes from different sources never see each other's
        // regions.
        let a = plain_square();
        let b = RegionIndex::from_svg(TWO_REGIONS, None, false).unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 2);
        assert_eq!(a.find_container(Point::new(130.0, 50.0), false, None), None);
    }
}
