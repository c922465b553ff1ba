use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::{Bounds, Pt2D};

/// A point in the 3D scene. The ground is the horizontal XZ plane and Y points up.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pt3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Pt3D {
    /// Lifts a planar point onto the ground: (x, y) becomes (x, 0, y).
    pub fn on_ground(pt: Pt2D) -> Pt3D {
        Pt3D {
            x: pt.x(),
            y: 0.0,
            z: pt.y(),
        }
    }

    /// Drops the height, undoing `on_ground`.
    pub fn to_ground(self) -> Pt2D {
        Pt2D::new(self.x, self.z)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const UP: Vec3 = Vec3 {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RibbonVertex {
    pub position: Pt3D,
    pub normal: Vec3,
}

/// A triangulated mesh, ready to hand to a renderer. Every build produces a fresh value with no
/// reference back to the path it came from.
// Deliberately not Deserialize; meshes are only ever produced by builders
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Mesh {
    pub(crate) vertices: Vec<RibbonVertex>,
    /// Each submesh is a list of triangles, indexing into `vertices`
    pub(crate) submeshes: Vec<Vec<[u32; 3]>>,
    /// Optional texture coordinates. Each channel has exactly one entry per vertex.
    pub(crate) uv_channels: Vec<Vec<[f32; 2]>>,
    /// Vertices before this index belong to segment bodies; the rest fill corners.
    pub(crate) num_body_vertices: usize,
}

impl Mesh {
    /// A flat mesh lying on the ground with one submesh. All normals point up.
    pub(crate) fn flat(
        points: Vec<Pt2D>,
        triangles: Vec<[u32; 3]>,
        num_body_vertices: usize,
    ) -> Mesh {
        let vertices = points
            .into_iter()
            .map(|pt| RibbonVertex {
                position: Pt3D::on_ground(pt),
                normal: Vec3::UP,
            })
            .collect();
        Mesh {
            vertices,
            submeshes: vec![triangles],
            uv_channels: Vec::new(),
            num_body_vertices,
        }
    }

    pub fn vertices(&self) -> &[RibbonVertex] {
        &self.vertices
    }

    pub fn body_vertices(&self) -> &[RibbonVertex] {
        &self.vertices[..self.num_body_vertices]
    }

    pub fn corner_vertices(&self) -> &[RibbonVertex] {
        &self.vertices[self.num_body_vertices..]
    }

    pub fn submeshes(&self) -> &[Vec<[u32; 3]>] {
        &self.submeshes
    }

    /// All triangles across every submesh, in order.
    pub fn indices(&self) -> impl Iterator<Item = &[u32; 3]> {
        self.submeshes.iter().flatten()
    }

    pub fn num_triangles(&self) -> usize {
        self.submeshes.iter().map(|s| s.len()).sum()
    }

    /// Resolves every triangle to its three corners.
    pub fn triangles(&self) -> Vec<[Pt3D; 3]> {
        self.indices()
            .map(|tri| {
                [
                    self.vertices[tri[0] as usize].position,
                    self.vertices[tri[1] as usize].position,
                    self.vertices[tri[2] as usize].position,
                ]
            })
            .collect()
    }

    pub fn uv_channels(&self) -> &[Vec<[f32; 2]>] {
        &self.uv_channels
    }

    /// Sets one UV channel, adding empty channels below it if needed. The channel must cover
    /// every vertex.
    pub fn set_uv_channel(&mut self, channel: usize, uvs: Vec<[f32; 2]>) -> Result<()> {
        if uvs.len() != self.vertices.len() {
            bail!(
                "UV channel {} has {} entries, but the mesh has {} vertices",
                channel,
                uvs.len(),
                self.vertices.len()
            );
        }
        while self.uv_channels.len() <= channel {
            self.uv_channels.push(Vec::new());
        }
        self.uv_channels[channel] = uvs;
        Ok(())
    }

    /// The footprint of the mesh on the ground.
    pub fn get_bounds(&self) -> Bounds {
        let mut b = Bounds::new();
        for v in &self.vertices {
            b.update(v.position.to_ground());
        }
        b
    }

    fn transform<F: Fn(Pt2D) -> Pt2D>(&mut self, f: F) {
        for v in &mut self.vertices {
            let pt = f(v.position.to_ground());
            v.position.x = pt.x();
            v.position.z = pt.y();
        }
    }

    /// Shifts the mesh along the ground.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.transform(|pt| pt.offset(dx, dy));
    }

    /// Scales the mesh's footprint around the origin, like when shrinking it into a minimap.
    pub fn scale(&mut self, factor: f64) {
        self.transform(|pt| Pt2D::new(pt.x() * factor, pt.y() * factor));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Mesh {
        Mesh::flat(
            vec![
                Pt2D::new(0.0, 0.0),
                Pt2D::new(1.0, 0.0),
                Pt2D::new(0.0, 1.0),
                Pt2D::new(1.0, 1.0),
            ],
            vec![[0, 1, 2], [1, 3, 2]],
            4,
        )
    }

    #[test]
    fn uv_channels_must_cover_vertices() {
        let mut mesh = square();
        assert!(mesh.set_uv_channel(0, vec![[0.0, 0.0]; 3]).is_err());
        assert!(mesh.uv_channels().is_empty());

        mesh.set_uv_channel(1, vec![[0.5, 0.5]; 4]).unwrap();
        assert_eq!(mesh.uv_channels().len(), 2);
        assert!(mesh.uv_channels()[0].is_empty());
        assert_eq!(mesh.uv_channels()[1].len(), 4);
    }

    #[test]
    fn minimap_transform() {
        let mut mesh = square();
        mesh.scale(0.5);
        mesh.translate(10.0, 20.0);
        let b = mesh.get_bounds();
        assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (10.0, 20.0, 10.5, 20.5));
        // Still flat
        assert!(mesh.vertices().iter().all(|v| v.position.y == 0.0));
    }

    #[test]
    fn triangles_resolve_indices() {
        let mesh = square();
        assert_eq!(mesh.num_triangles(), 2);
        let tris = mesh.triangles();
        assert_eq!(tris[1][1], Pt3D::on_ground(Pt2D::new(1.0, 1.0)));
    }
}
