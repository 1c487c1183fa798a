use glam::{Quat, Vec3};

use crate::{
    math::{barycentric, triangle_normal},
    mesh::WalkMesh,
};

/// Barycentric weights this far below zero still count as inside the
/// triangle. Anything between this and zero is clamped away.
pub const WEIGHT_EPSILON: f32 = 1e-6;

/// Default maximum number of edge transitions in a single walk.
pub const DEFAULT_MAX_DEPTH: u32 = 10;

/// A position on the surface of a [`WalkMesh`], as a triangle and the
/// barycentric weights of the position with respect to its three vertices.
///
/// A walk point does not borrow the mesh it was created from. It is only
/// meaningful together with that mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkPoint {
    /// Vertex indices of the current triangle.
    pub triangle: [u32; 3],
    /// Barycentric coordinates that sum to one.
    pub weights: Vec3,
}

/// What happens to the remainder of a step that runs into the boundary of an
/// open mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    /// Stop on the boundary edge and drop the rest of the step.
    Stop,
    /// Project the rest of the step onto the boundary edge and move along it.
    #[default]
    Slide,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkConfig {
    /// Maximum number of edge transitions per walk. Crossing into a
    /// neighboring triangle and sliding along a boundary edge count as one
    /// each. This bounds the work done for degenerate steps that keep
    /// bouncing between thin triangles.
    pub max_depth: u32,
    pub boundary: BoundaryPolicy,
    /// Rotate the rest of the step with the surface when crossing an edge
    /// between triangles that are not coplanar. Without this the step keeps
    /// its world direction and is projected onto the next triangle, which
    /// stalls the walk on sharp convex edges.
    pub rotate_over_edges: bool,
}

impl Default for WalkConfig {
    fn default() -> Self {
        WalkConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            boundary: BoundaryPolicy::default(),
            rotate_over_edges: false,
        }
    }
}

impl WalkConfig {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_rotate_over_edges(mut self, rotate: bool) -> Self {
        self.rotate_over_edges = rotate;
        self
    }
}

/// How a walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOutcome {
    /// The whole step was taken.
    Arrived,
    /// The walk ended on a boundary edge of the mesh.
    Boundary,
    /// The walk needed more edge transitions than allowed, and stopped where
    /// it was.
    DepthLimit,
    /// The step could not be projected onto the current triangle.
    Stalled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkReport {
    pub outcome: WalkOutcome,
    /// Number of edge transitions taken.
    pub transitions: u32,
}

impl WalkReport {
    fn new(outcome: WalkOutcome, transitions: u32) -> Self {
        WalkReport {
            outcome,
            transitions,
        }
    }
}

impl WalkMesh {
    /// World space position of the walk point.
    pub fn world_point(&self, wp: &WalkPoint) -> Vec3 {
        let [a, b, c] = self.triangle_points(wp.triangle);
        wp.weights.x * a + wp.weights.y * b + wp.weights.z * c
    }

    /// Surface normal at the walk point, interpolated from the vertex normals.
    pub fn world_normal(&self, wp: &WalkPoint) -> Vec3 {
        let [a, b, c] = wp.triangle.map(|v| self.normal(v));
        (wp.weights.x * a + wp.weights.y * b + wp.weights.z * c).normalize_or_zero()
    }

    /// Move the walk point by `step` along the surface, with the default
    /// [`WalkConfig`].
    pub fn walk(&self, wp: &mut WalkPoint, step: Vec3) -> WalkReport {
        self.walk_with(wp, step, &WalkConfig::default())
    }

    /// Move the walk point by `step` along the surface.
    ///
    /// The destination is projected onto the plane of the current triangle. If
    /// it lies inside the triangle the walk is done. Otherwise the point moves
    /// to the first edge it crosses, and the rest of the step continues in the
    /// triangle across that edge, or along the edge if it is on the boundary
    /// of the mesh.
    pub fn walk_with(&self, wp: &mut WalkPoint, step: Vec3, config: &WalkConfig) -> WalkReport {
        let mut step = step;
        let mut transitions = 0u32;
        loop {
            if step.length() < f32::EPSILON {
                return WalkReport::new(WalkOutcome::Arrived, transitions);
            }
            let [a, b, c] = self.triangle_points(wp.triangle);
            let target = self.world_point(wp) + step;
            let projected = barycentric(target, a, b, c);
            if !projected.is_finite() {
                log::debug!(
                    "Walk stalled on triangle {:?} with step {}",
                    wp.triangle,
                    step
                );
                return WalkReport::new(WalkOutcome::Stalled, transitions);
            }
            let weights_step = projected - wp.weights;
            // The edge the step reaches first. Ties go to the lowest corner.
            let mut crossing: Option<(usize, f32)> = None;
            for i in (0..3).filter(|&i| projected[i] < -WEIGHT_EPSILON) {
                let coeff = if weights_step[i] < 0.0 {
                    (wp.weights[i] / -weights_step[i]).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                if crossing.is_none_or(|(_, best)| coeff < best) {
                    crossing = Some((i, coeff));
                }
            }
            let Some((i, reduced_coeff)) = crossing else {
                wp.weights = clamp_weights(projected);
                return WalkReport::new(WalkOutcome::Arrived, transitions);
            };
            if transitions >= config.max_depth {
                log::debug!(
                    "Walk hit the limit of {} transitions on triangle {:?}",
                    config.max_depth,
                    wp.triangle
                );
                return WalkReport::new(WalkOutcome::DepthLimit, transitions);
            }
            transitions += 1;
            // Move onto the edge opposite the corner `i`.
            wp.weights += weights_step * reduced_coeff;
            wp.weights[i] = 0.0;
            let (j, k) = ((i + 1) % 3, (i + 2) % 3);
            let edge = (wp.triangle[j], wp.triangle[k]);
            let reduced_step = target - self.world_point(wp);

            match self.adjacency().triangle_across(edge.0, edge.1) {
                Some(ti) => {
                    let next = self.triangle(ti);
                    let (wj, wk) = (wp.weights[j], wp.weights[k]);
                    // Same point, expressed in the next triangle.
                    let weights = Vec3::from_array(next.map(|v| {
                        if v == edge.0 {
                            wj
                        } else if v == edge.1 {
                            wk
                        } else {
                            0.0
                        }
                    }));
                    step = if config.rotate_over_edges {
                        self.rotate_over_edge(wp.triangle, next, reduced_step)
                    } else {
                        reduced_step
                    };
                    log::trace!(
                        "Crossed edge {:?} from {:?} into {:?}",
                        edge,
                        wp.triangle,
                        next
                    );
                    *wp = WalkPoint {
                        triangle: next,
                        weights,
                    };
                }
                None => match config.boundary {
                    BoundaryPolicy::Stop => {
                        return WalkReport::new(WalkOutcome::Boundary, transitions);
                    }
                    BoundaryPolicy::Slide => {
                        let rest = slide_along_edge(self, wp, i, reduced_step);
                        if rest == Vec3::ZERO {
                            return WalkReport::new(WalkOutcome::Boundary, transitions);
                        }
                        log::trace!("Sliding past the end of boundary edge {:?}", edge);
                        step = rest;
                    }
                },
            }
        }
    }

    /// Rotate `step` by the rotation that takes the normal of `from` onto the
    /// normal of `to`.
    fn rotate_over_edge(&self, from: [u32; 3], to: [u32; 3], step: Vec3) -> Vec3 {
        let [a, b, c] = self.triangle_points(from);
        let n0 = triangle_normal(a, b, c);
        let [a, b, c] = self.triangle_points(to);
        let n1 = triangle_normal(a, b, c);
        Quat::from_rotation_arc(n0, n1) * step
    }
}

/// Move the walk point along the edge opposite corner `i` by the projection of
/// `step` onto that edge, stopping at the ends of the edge. Returns the part
/// of the step that runs past the end of the edge, or zero if there is none or
/// the point cannot move along the edge at all.
fn slide_along_edge(mesh: &WalkMesh, wp: &mut WalkPoint, i: usize, step: Vec3) -> Vec3 {
    let (j, k) = ((i + 1) % 3, (i + 2) % 3);
    let dir = mesh.vertex(wp.triangle[k]) - mesh.vertex(wp.triangle[j]);
    // Moving by `t` edge lengths from `j` towards `k` shifts `t` of the weight
    // from `j` onto `k`.
    let t = step.dot(dir) / dir.length_squared();
    let moved = t.max(-wp.weights[k]).min(wp.weights[j]);
    if moved.abs() <= WEIGHT_EPSILON {
        return Vec3::ZERO;
    }
    wp.weights[j] -= moved;
    wp.weights[k] += moved;
    let rest = t - moved;
    if rest.abs() <= WEIGHT_EPSILON {
        Vec3::ZERO
    } else {
        dir * rest
    }
}

/// Clamp the small negative weights left over from rounding, and make the
/// weights sum to one again.
fn clamp_weights(weights: Vec3) -> Vec3 {
    let weights = weights.max(Vec3::ZERO);
    weights / weights.element_sum()
}
