use crate::{Distance, Mesh, Pt2D};

impl Mesh {
    /// Turns a path into a flat ribbon: one quad per segment, offset `width` to each side of the
    /// center line, plus two triangles at every interior point to cover the gap between
    /// consecutive quads.
    ///
    /// The corner fill goes on both sides of every joint, no matter which way the path turns. The
    /// inside of a turn gets overdrawn, but the outside never has a hole, even for very sharp
    /// turns. Reversals just make heavily overlapping corners.
    ///
    /// Panics if there are fewer than 2 points, if the width isn't positive, or if two
    /// consecutive points are equal.
    pub fn ribbon(pts: &[Pt2D], width: Distance) -> Mesh {
        assert!(
            pts.len() >= 2,
            "A ribbon needs at least 2 points, but got {}",
            pts.len()
        );
        assert!(
            width > Distance::ZERO,
            "A ribbon needs a positive width, but got {}",
            width
        );
        let w = width.inner_meters();

        let num_body_vertices = 4 * (pts.len() - 1);
        let mut points: Vec<Pt2D> = Vec::with_capacity(num_body_vertices + 6 * (pts.len() - 2));
        let mut triangles: Vec<[u32; 3]> = Vec::with_capacity(4 * pts.len());

        for (idx, pair) in pts.windows(2).enumerate() {
            let (pt1, pt2) = (pair[0], pair[1]);
            let dx = pt2.x() - pt1.x();
            let dy = pt2.y() - pt1.y();
            let len = dx.hypot(dy);
            if len == 0.0 {
                panic!(
                    "Segment {} of a ribbon has zero length; {} is repeated",
                    idx, pt1
                );
            }
            // Unit direction, then rotated 90 degrees counter-clockwise
            let (ab_x, ab_y) = (dx / len, dy / len);
            let (tab_x, tab_y) = (-ab_y, ab_x);

            let near_left = pt1.offset(-tab_x * w, -tab_y * w);
            let near_right = pt1.offset(tab_x * w, tab_y * w);
            // Translate the near side instead of offsetting pt2, so the quad stays a rectangle
            // even if pt1 + ab * len drifts from pt2.
            let far_left = near_left.offset(ab_x * len, ab_y * len);
            let far_right = near_right.offset(ab_x * len, ab_y * len);

            let first = vertex_idx(points.len());
            points.extend([near_left, near_right, far_left, far_right]);
            triangles.push([first, first + 1, first + 2]);
            triangles.push([first + 1, first + 3, first + 2]);
        }

        for idx in 0..pts.len() - 2 {
            let prev_left = points[4 * idx + 2];
            let prev_right = points[4 * idx + 3];
            let next_left = points[4 * (idx + 1)];
            let next_right = points[4 * (idx + 1) + 1];
            let center = prev_right.midpoint(prev_left);

            let first = vertex_idx(points.len());
            points.extend([center, prev_right, next_right]);
            points.extend([center, next_left, prev_left]);
            triangles.push([first, first + 1, first + 2]);
            triangles.push([first + 3, first + 4, first + 5]);
        }

        Mesh::flat(points, triangles, num_body_vertices)
    }
}

fn vertex_idx(x: usize) -> u32 {
    // Leave room for the vertices about to be added
    if let Ok(idx) = u32::try_from(x + 6) {
        idx - 6
    } else {
        panic!("{} vertices can't be indexed with u32, the ribbon is too huge", x);
    }
}
