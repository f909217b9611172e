//! Mesh-level entry points: validate, build trees, compose, rebuild the mesh.

use crate::errors::Result;
use crate::float_types::Real;
use crate::mesh::bsp::{self, BspTree};
use crate::mesh::model::{MaterialIndex, Model, TriangleMesh};
use crate::mesh::polygon::Polygon;
use crate::options::CsgOptions;
use log::debug;
use nalgebra::Matrix4;

/// The three supported set operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Union,
    Subtract,
    Intersect,
}

/// One operand as handed over by the host: a mesh, one material per
/// submesh, and the transform placing it in world space.
#[derive(Debug, Clone)]
pub struct Solid<'a, M> {
    pub mesh: &'a TriangleMesh,
    pub materials: &'a [M],
    pub transform: Matrix4<Real>,
}

impl<'a, M> Solid<'a, M> {
    pub const fn new(
        mesh: &'a TriangleMesh,
        materials: &'a [M],
        transform: Matrix4<Real>,
    ) -> Self {
        Solid {
            mesh,
            materials,
            transform,
        }
    }
}

/// Run `operation` on two models.
///
/// The material tables of both operands are merged (equal materials share
/// one entry) and the result holds one submesh per material it still uses.
/// Fails only if `options` is invalid.
pub fn perform<M: Clone + PartialEq>(
    operation: Operation,
    lhs: &Model<M>,
    rhs: &Model<M>,
    options: &CsgOptions,
) -> Result<Model<M>> {
    options.validate()?;

    let mut materials: Vec<M> = Vec::with_capacity(lhs.materials.len() + rhs.materials.len());
    let lhs_polygons = tag_polygons(lhs, &mut materials);
    let rhs_polygons = tag_polygons(rhs, &mut materials);

    debug!(
        "{operation:?}: {} x {} polygons, {} materials, epsilon {}",
        lhs_polygons.len(),
        rhs_polygons.len(),
        materials.len(),
        options.epsilon
    );

    let a = BspTree::from_polygons(&lhs_polygons, options.epsilon);
    let b = BspTree::from_polygons(&rhs_polygons, options.epsilon);

    let result = match operation {
        Operation::Union => bsp::union(&a, &b),
        Operation::Subtract => bsp::subtract(&a, &b),
        Operation::Intersect => bsp::intersect(&a, &b),
    };

    Ok(Model::from_polygons(&result.all_polygons(), &materials))
}

/// Run `operation` on two host meshes and return the merged mesh with its
/// material table. Arguments are validated before any geometric work; the
/// only later failure is a result too large for 32-bit indices.
pub fn perform_on_meshes<M: Clone + PartialEq>(
    operation: Operation,
    lhs: &Solid<'_, M>,
    rhs: &Solid<'_, M>,
    options: &CsgOptions,
) -> Result<(TriangleMesh, Vec<M>)> {
    options.validate()?;
    let lhs = Model::from_mesh(lhs.mesh, lhs.materials, &lhs.transform)?;
    let rhs = Model::from_mesh(rhs.mesh, rhs.materials, &rhs.transform)?;
    perform(operation, &lhs, &rhs, options)?.into_mesh()
}

pub fn union<M: Clone + PartialEq>(
    lhs: &Model<M>,
    rhs: &Model<M>,
    options: &CsgOptions,
) -> Result<Model<M>> {
    perform(Operation::Union, lhs, rhs, options)
}

pub fn subtract<M: Clone + PartialEq>(
    lhs: &Model<M>,
    rhs: &Model<M>,
    options: &CsgOptions,
) -> Result<Model<M>> {
    perform(Operation::Subtract, lhs, rhs, options)
}

pub fn intersect<M: Clone + PartialEq>(
    lhs: &Model<M>,
    rhs: &Model<M>,
    options: &CsgOptions,
) -> Result<Model<M>> {
    perform(Operation::Intersect, lhs, rhs, options)
}

/// Polygons of `model` tagged with indices into the shared `materials` table,
/// appending materials not seen yet.
fn tag_polygons<M: Clone + PartialEq>(
    model: &Model<M>,
    materials: &mut Vec<M>,
) -> Vec<Polygon<MaterialIndex>> {
    let remap: Vec<MaterialIndex> = model
        .materials
        .iter()
        .map(|material| match materials.iter().position(|known| known == material) {
            Some(index) => index,
            None => {
                materials.push(material.clone());
                materials.len() - 1
            },
        })
        .collect();

    // Submeshes without a material keep an index past the table and are
    // dropped when the result is rebuilt.
    let mut polygons = model.to_polygons();
    for polygon in &mut polygons {
        polygon.material = remap
            .get(polygon.material)
            .copied()
            .unwrap_or(MaterialIndex::MAX);
    }
    polygons
}
