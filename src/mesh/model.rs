//! Conversion between indexed triangle meshes and flat polygon lists.
//!
//! A [`TriangleMesh`] is the renderable form: attribute arrays plus one index
//! list per submesh. A [`Model`] is the same data moved to world space with
//! one material per submesh. It only exists at the entry and exit of a
//! boolean operation.

use crate::errors::{CsgError, Result};
use crate::float_types::Real;
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::{Vertex, VertexAttributes};
use log::warn;
use nalgebra::{Matrix4, Point3, SVector, Vector2, Vector3, Vector4};

/// Index into a material table. Polygons carry this instead of the material.
pub type MaterialIndex = usize;

/// Structure-of-arrays triangle mesh.
///
/// Optional attribute arrays are either empty (attribute absent) or exactly as
/// long as `positions`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TriangleMesh {
    pub positions: Vec<Point3<Real>>,
    pub colors: Vec<Vector4<Real>>,
    pub normals: Vec<Vector3<Real>>,
    pub tangents: Vec<Vector4<Real>>,
    pub uv0: Vec<Vector2<Real>>,
    pub uv2: Vec<Vector4<Real>>,
    pub uv3: Vec<Vector4<Real>>,
    pub uv4: Vec<Vector4<Real>>,

    /// Triangle index lists, one per submesh
    pub submeshes: Vec<Vec<u32>>,
}

impl TriangleMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.submeshes.iter().map(|indices| indices.len() / 3).sum()
    }

    /// Attributes whose arrays are populated
    pub fn attributes(&self) -> VertexAttributes {
        let mut attributes = VertexAttributes::empty();
        attributes.set(VertexAttributes::COLOR, !self.colors.is_empty());
        attributes.set(VertexAttributes::NORMAL, !self.normals.is_empty());
        attributes.set(VertexAttributes::TANGENT, !self.tangents.is_empty());
        attributes.set(VertexAttributes::UV0, !self.uv0.is_empty());
        attributes.set(VertexAttributes::UV2, !self.uv2.is_empty());
        attributes.set(VertexAttributes::UV3, !self.uv3.is_empty());
        attributes.set(VertexAttributes::UV4, !self.uv4.is_empty());
        attributes
    }

    /// Gather vertex `i`; only meaningful after [`TriangleMesh::validate`]
    pub fn vertex(&self, i: usize) -> Vertex {
        let mut v = Vertex::new(self.positions[i]);
        v.set_color(self.colors.get(i).copied());
        v.set_normal(self.normals.get(i).copied());
        v.set_tangent(self.tangents.get(i).copied());
        v.set_uv0(self.uv0.get(i).copied());
        v.set_uv2(self.uv2.get(i).copied());
        v.set_uv3(self.uv3.get(i).copied());
        v.set_uv4(self.uv4.get(i).copied());
        v
    }

    /// Check that the mesh can be turned into triangles
    pub fn validate(&self) -> Result<()> {
        if self.submeshes.is_empty() {
            return Err(CsgError::NoSubmeshes);
        }

        let expected = self.positions.len();
        let lengths = [
            ("colors", self.colors.len()),
            ("normals", self.normals.len()),
            ("tangents", self.tangents.len()),
            ("uv0", self.uv0.len()),
            ("uv2", self.uv2.len()),
            ("uv3", self.uv3.len()),
            ("uv4", self.uv4.len()),
        ];
        if let Some(&(attribute, len)) = lengths
            .iter()
            .find(|(_, len)| *len != 0 && *len != expected)
        {
            return Err(CsgError::AttributeLengthMismatch {
                attribute,
                len,
                expected,
            });
        }

        let non_finite = [
            (
                "positions",
                self.positions.iter().position(|p| !p.coords.iter().all(|c| c.is_finite())),
            ),
            ("colors", first_non_finite(&self.colors)),
            ("normals", first_non_finite(&self.normals)),
            ("tangents", first_non_finite(&self.tangents)),
            ("uv0", first_non_finite(&self.uv0)),
            ("uv2", first_non_finite(&self.uv2)),
            ("uv3", first_non_finite(&self.uv3)),
            ("uv4", first_non_finite(&self.uv4)),
        ];
        if let Some((attribute, index)) = non_finite
            .into_iter()
            .find_map(|(attribute, index)| index.map(|index| (attribute, index)))
        {
            return Err(CsgError::NonFiniteValue { attribute, index });
        }

        for (submesh, indices) in self.submeshes.iter().enumerate() {
            if indices.len() % 3 != 0 {
                return Err(CsgError::IncompleteTriangle {
                    submesh,
                    len: indices.len(),
                });
            }
            if let Some(&index) = indices.iter().find(|&&index| index as usize >= expected) {
                return Err(CsgError::IndexOutOfRange {
                    submesh,
                    index,
                    vertex_count: expected,
                });
            }
        }

        Ok(())
    }
}

fn first_non_finite<const D: usize>(values: &[SVector<Real, D>]) -> Option<usize> {
    values.iter().position(|v| !v.iter().all(|c| c.is_finite()))
}

/// World-space vertex buffer, per-submesh index lists and their materials
#[derive(Debug, Clone, PartialEq)]
pub struct Model<M> {
    pub vertices: Vec<Vertex>,
    pub submeshes: Vec<Vec<usize>>,
    pub materials: Vec<M>,
}

impl<M: Clone> Model<M> {
    /// Validate `mesh` and move its vertices to world space.
    ///
    /// `materials` must hold one entry per submesh.
    pub fn from_mesh(
        mesh: &TriangleMesh,
        materials: &[M],
        transform: &Matrix4<Real>,
    ) -> Result<Self> {
        mesh.validate()?;
        if materials.len() != mesh.submeshes.len() {
            return Err(CsgError::MaterialCountMismatch {
                materials: materials.len(),
                submeshes: mesh.submeshes.len(),
            });
        }
        if transform.iter().any(|c| !c.is_finite()) {
            return Err(CsgError::InvalidTransform);
        }

        let vertices = (0..mesh.vertex_count())
            .map(|i| mesh.vertex(i).transform(transform))
            .collect();
        let submeshes = mesh
            .submeshes
            .iter()
            .map(|indices| indices.iter().map(|&i| i as usize).collect())
            .collect();

        Ok(Model {
            vertices,
            submeshes,
            materials: materials.to_vec(),
        })
    }

    /// One triangle polygon per index triple, tagged with its submesh index.
    ///
    /// Triples referencing a missing vertex are skipped; [`Model::from_mesh`]
    /// never produces them.
    pub fn to_polygons(&self) -> Vec<Polygon<MaterialIndex>> {
        self.submeshes
            .iter()
            .enumerate()
            .flat_map(|(material, indices)| {
                indices.chunks_exact(3).filter_map(move |tri| {
                    let vertices = tri
                        .iter()
                        .map(|&i| self.vertices.get(i).copied())
                        .collect::<Option<Vec<_>>>()?;
                    Some(Polygon::new(vertices, material))
                })
            })
            .collect()
    }

    /// Rebuild a model from a polygon list.
    ///
    /// Polygons are grouped by material in order of first appearance, one
    /// submesh per material that is actually used. Every polygon is fan
    /// triangulated with fresh, unwelded vertices.
    pub fn from_polygons(polygons: &[Polygon<MaterialIndex>], materials: &[M]) -> Self {
        let mut vertices = Vec::new();
        let mut submeshes: Vec<Vec<usize>> = Vec::new();
        let mut used: Vec<M> = Vec::new();
        // material index -> submesh slot
        let mut slots: Vec<Option<usize>> = vec![None; materials.len()];

        for polygon in polygons {
            let Some(slot) = slots.get_mut(polygon.material) else {
                warn!(
                    "dropping polygon with material {} (table has {})",
                    polygon.material,
                    materials.len()
                );
                continue;
            };
            let submesh = *slot.get_or_insert_with(|| {
                submeshes.push(Vec::new());
                used.push(materials[polygon.material].clone());
                submeshes.len() - 1
            });

            for triangle in polygon.triangulate() {
                submeshes[submesh].extend(vertices.len()..vertices.len() + 3);
                vertices.extend(triangle);
            }
        }

        Model {
            vertices,
            submeshes,
            materials: used,
        }
    }

    /// Emit the renderable mesh.
    ///
    /// Attribute arrays are written for the attributes present on the first
    /// vertex; other vertices are assumed to match. Fails if an index does not
    /// fit in `u32`.
    pub fn to_mesh(&self) -> Result<TriangleMesh> {
        let attributes = self
            .vertices
            .first()
            .map_or(VertexAttributes::empty(), |v| v.attributes);

        fn column<T>(
            vertices: &[Vertex],
            present: bool,
            field: impl Fn(&Vertex) -> T,
        ) -> Vec<T> {
            if present {
                vertices.iter().map(field).collect()
            } else {
                Vec::new()
            }
        }

        let count = self.vertices.len();
        let submeshes = self
            .submeshes
            .iter()
            .map(|indices| {
                indices
                    .iter()
                    .map(|&i| u32::try_from(i).map_err(|_| CsgError::TooManyVertices { count }))
                    .collect::<Result<Vec<u32>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        let v = &self.vertices;
        Ok(TriangleMesh {
            positions: v.iter().map(|v| v.pos).collect(),
            colors: column(v, attributes.contains(VertexAttributes::COLOR), |v| v.color),
            normals: column(v, attributes.contains(VertexAttributes::NORMAL), |v| v.normal),
            tangents: column(v, attributes.contains(VertexAttributes::TANGENT), |v| v.tangent),
            uv0: column(v, attributes.contains(VertexAttributes::UV0), |v| v.uv0),
            uv2: column(v, attributes.contains(VertexAttributes::UV2), |v| v.uv2),
            uv3: column(v, attributes.contains(VertexAttributes::UV3), |v| v.uv3),
            uv4: column(v, attributes.contains(VertexAttributes::UV4), |v| v.uv4),
            submeshes,
        })
    }

    /// Emit the renderable mesh together with its material table
    pub fn into_mesh(self) -> Result<(TriangleMesh, Vec<M>)> {
        let mesh = self.to_mesh()?;
        Ok((mesh, self.materials))
    }
}
