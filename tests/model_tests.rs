mod support;

use approx::assert_relative_eq;
use bsp_csg::{
    CsgError, CsgOptions, Model, Operation, Solid, TriangleMesh, intersect, perform,
    perform_on_meshes, subtract, union,
    float_types::Real,
    mesh::{
        polygon::{Polygon, signed_volume},
        vertex::{Vertex, VertexAttributes},
    },
};
use nalgebra::{Matrix4, Point3, Vector2, Vector3};

use crate::support::{cube_model, unit_cube_mesh};

fn options() -> CsgOptions {
    CsgOptions::default().with_epsilon(1e-5)
}

fn volume<M: Clone>(model: &Model<M>) -> Real {
    signed_volume(&model.to_polygons())
}

fn sorted<T: Clone + Ord>(items: &[T]) -> Vec<T> {
    let mut items = items.to_vec();
    items.sort();
    items
}

#[test]
fn from_mesh_moves_vertices_to_world_space() {
    let model = cube_model([2.0, -1.0, 0.5], "a");
    assert_eq!(model.vertices.len(), 8);
    assert_eq!(model.submeshes.len(), 1);
    assert_eq!(model.materials, vec!["a"]);
    assert!(model.vertices.contains(&Vertex::new(Point3::new(2.0, -1.0, 0.5))));
    assert!(model.vertices.contains(&Vertex::new(Point3::new(3.0, 0.0, 1.5))));
    assert_relative_eq!(volume(&model), 1.0, epsilon = 1e-9);
}

#[test]
fn to_polygons_yields_one_triangle_per_index_triple() {
    let model = cube_model([0.0, 0.0, 0.0], ());
    let polygons = model.to_polygons();
    assert_eq!(polygons.len(), 12);
    assert!(polygons.iter().all(|p| p.vertices.len() == 3 && p.material == 0));
}

#[test]
fn to_polygons_tags_submesh_index() {
    let mut mesh = unit_cube_mesh();
    let second = mesh.submeshes[0].split_off(18);
    mesh.submeshes.push(second);
    let model = Model::from_mesh(&mesh, &["walls", "lids"], &Matrix4::identity()).expect("valid");

    let polygons = model.to_polygons();
    assert_eq!(polygons.iter().filter(|p| p.material == 0).count(), 6);
    assert_eq!(polygons.iter().filter(|p| p.material == 1).count(), 6);
}

#[test]
fn validation_errors() {
    let identity = Matrix4::identity();

    let empty = TriangleMesh::default();
    assert_eq!(
        Model::<()>::from_mesh(&empty, &[], &identity),
        Err(CsgError::NoSubmeshes)
    );

    let mut mesh = unit_cube_mesh();
    mesh.normals = vec![Vector3::z(); 3];
    assert_eq!(
        Model::from_mesh(&mesh, &[()], &identity),
        Err(CsgError::AttributeLengthMismatch {
            attribute: "normals",
            len: 3,
            expected: 8
        })
    );

    let mut mesh = unit_cube_mesh();
    mesh.submeshes[0].pop();
    assert_eq!(
        Model::from_mesh(&mesh, &[()], &identity),
        Err(CsgError::IncompleteTriangle { submesh: 0, len: 35 })
    );

    let mut mesh = unit_cube_mesh();
    mesh.submeshes.push(vec![0, 1, 8]);
    assert_eq!(
        Model::from_mesh(&mesh, &[(), ()], &identity),
        Err(CsgError::IndexOutOfRange {
            submesh: 1,
            index: 8,
            vertex_count: 8
        })
    );

    let mut mesh = unit_cube_mesh();
    mesh.positions[7] = Point3::new(Real::NAN, 1.0, 1.0);
    assert_eq!(
        Model::from_mesh(&mesh, &[()], &identity),
        Err(CsgError::NonFiniteValue {
            attribute: "positions",
            index: 7
        })
    );

    let mut mesh = unit_cube_mesh();
    mesh.uv0 = vec![Vector2::zeros(); 8];
    mesh.uv0[3].x = Real::INFINITY;
    assert_eq!(
        Model::from_mesh(&mesh, &[()], &identity),
        Err(CsgError::NonFiniteValue {
            attribute: "uv0",
            index: 3
        })
    );

    let mesh = unit_cube_mesh();
    assert_eq!(
        Model::from_mesh(&mesh, &["a", "b"], &identity),
        Err(CsgError::MaterialCountMismatch {
            materials: 2,
            submeshes: 1
        })
    );

    let mut transform = Matrix4::identity();
    transform[(0, 3)] = Real::NAN;
    assert_eq!(
        Model::from_mesh(&mesh, &[()], &transform),
        Err(CsgError::InvalidTransform)
    );
}

#[test]
fn errors_render_readable_messages() {
    let message = CsgError::MaterialCountMismatch {
        materials: 2,
        submeshes: 1,
    }
    .to_string();
    assert!(message.contains("2 materials for 1 submeshes"));
}

#[test]
fn from_polygons_fans_and_unwelds() {
    let quad = Polygon::new(
        vec![
            Vertex::new(Point3::new(0.0, 0.0, 0.0)),
            Vertex::new(Point3::new(1.0, 0.0, 0.0)),
            Vertex::new(Point3::new(1.0, 1.0, 0.0)),
            Vertex::new(Point3::new(0.0, 1.0, 0.0)),
        ],
        0,
    );
    let model = Model::from_polygons(&[quad], &["only"]);
    assert_eq!(model.vertices.len(), 6);
    assert_eq!(model.submeshes, vec![vec![0, 1, 2, 3, 4, 5]]);
    assert_eq!(model.vertices[3].pos, Point3::origin());
}

#[test]
fn from_polygons_groups_by_first_appearance_and_drops_unused() {
    let triangle = |material: usize| {
        Polygon::new(
            vec![
                Vertex::new(Point3::new(0.0, 0.0, 0.0)),
                Vertex::new(Point3::new(1.0, 0.0, 0.0)),
                Vertex::new(Point3::new(0.0, 1.0, 0.0)),
            ],
            material,
        )
    };
    let polygons = [triangle(2), triangle(0), triangle(2), triangle(7)];
    let model = Model::from_polygons(&polygons, &["a", "b", "c"]);

    assert_eq!(model.materials, vec!["c", "a"]);
    assert_eq!(model.submeshes.len(), 2);
    assert_eq!(model.submeshes[0].len(), 6);
    assert_eq!(model.submeshes[1].len(), 3);
    // The triangle tagged 7 has no material and is dropped
    assert_eq!(model.vertices.len(), 9);
}

#[test]
fn to_mesh_writes_present_attribute_columns() {
    let mut mesh = unit_cube_mesh();
    mesh.uv0 = (0..8).map(|i| Vector2::new(i as Real, 0.0)).collect();
    let model = Model::from_mesh(&mesh, &[()], &Matrix4::identity()).expect("valid");
    assert!(model.vertices.iter().all(|v| v.attributes == VertexAttributes::UV0));

    let (out, materials) = model.into_mesh().expect("indices fit");
    assert_eq!(materials, vec![()]);
    assert_eq!(out.vertex_count(), 8);
    assert_eq!(out.uv0, mesh.uv0);
    assert!(out.normals.is_empty() && out.colors.is_empty() && out.tangents.is_empty());
    assert_eq!(out.attributes(), VertexAttributes::UV0);
    assert_eq!(out.submeshes, mesh.submeshes);
}

#[test]
fn union_of_disjoint_models() {
    let a = cube_model([0.0, 0.0, 0.0], "stone");
    let b = cube_model([3.0, 0.0, 0.0], "stone");

    let result = union(&a, &b, &options()).expect("valid options");
    assert_eq!(result.materials, vec!["stone"]);
    let mesh = result.to_mesh().expect("indices fit");
    assert_eq!(mesh.triangle_count(), 24);
    assert_eq!(mesh.vertex_count(), 72);
    assert_relative_eq!(volume(&result), 2.0, epsilon = 1e-9);
}

#[test]
fn union_merges_distinct_materials() {
    let a = cube_model([0.0, 0.0, 0.0], "stone");
    let b = cube_model([0.5, 0.0, 0.0], "glass");

    let result = union(&a, &b, &options()).expect("valid options");
    assert_eq!(sorted(&result.materials), vec!["glass", "stone"]);
    assert_eq!(result.submeshes.len(), 2);
    assert_relative_eq!(volume(&result), 1.5, epsilon = 1e-9);
}

#[test]
fn subtract_keeps_cutter_material_on_the_cut() {
    let a = cube_model([0.0, 0.0, 0.0], "stone");
    let b = cube_model([0.5, 0.0, 0.0], "glass");

    let cut = subtract(&a, &b, &options()).expect("valid options");
    assert_eq!(sorted(&cut.materials), vec!["glass", "stone"]);
    assert_relative_eq!(volume(&cut), 0.5, epsilon = 1e-9);

    let far = cube_model([4.0, 0.0, 0.0], "glass");
    let untouched = subtract(&a, &far, &options()).expect("valid options");
    assert_eq!(untouched.materials, vec!["stone"]);
    assert_eq!(untouched.to_mesh().expect("indices fit").triangle_count(), 12);
}

#[test]
fn intersect_of_disjoint_models_is_empty() {
    let a = cube_model([0.0, 0.0, 0.0], 1u32);
    let b = cube_model([4.0, 0.0, 0.0], 2u32);

    let result = intersect(&a, &b, &options()).expect("valid options");
    assert!(result.vertices.is_empty());
    assert!(result.submeshes.is_empty());
    assert!(result.materials.is_empty());
    assert_eq!(result.to_mesh(), Ok(TriangleMesh::default()));
}

#[test]
fn perform_rejects_invalid_tolerance() {
    let a = cube_model([0.0, 0.0, 0.0], ());
    let bad = CsgOptions::default().with_epsilon(-1.0);
    assert_eq!(
        perform(Operation::Union, &a, &a, &bad),
        Err(CsgError::InvalidTolerance(-1.0))
    );
}

#[test]
fn perform_on_meshes_places_operands() {
    let mesh = unit_cube_mesh();
    let lhs = Solid::new(&mesh, &["a"], Matrix4::identity());
    let rhs = Solid::new(&mesh, &["b"], Matrix4::new_translation(&Vector3::new(0.0, 0.0, 0.5)));

    let (out, materials) =
        perform_on_meshes(Operation::Intersect, &lhs, &rhs, &options()).expect("valid");
    assert_eq!(sorted(&materials), vec!["a", "b"]);
    assert_eq!(out.submeshes.len(), 2);

    let result =
        Model::from_mesh(&out, &materials, &Matrix4::identity()).expect("output is valid input");
    assert_relative_eq!(volume(&result), 0.5, epsilon = 1e-9);
}

#[test]
fn perform_on_meshes_rejects_non_finite_positions() {
    let mesh = unit_cube_mesh();
    let mut broken = unit_cube_mesh();
    broken.positions[2].z = Real::NEG_INFINITY;
    let lhs = Solid::new(&mesh, &["a"], Matrix4::identity());
    let rhs = Solid::new(&broken, &["b"], Matrix4::identity());
    assert_eq!(
        perform_on_meshes(Operation::Union, &lhs, &rhs, &options()),
        Err(CsgError::NonFiniteValue {
            attribute: "positions",
            index: 2
        })
    );
}

#[test]
fn perform_on_meshes_validates_before_work() {
    let mesh = unit_cube_mesh();
    let lhs = Solid::new(&mesh, &["a", "b"], Matrix4::identity());
    let rhs = Solid::new(&mesh, &["a"], Matrix4::identity());
    assert_eq!(
        perform_on_meshes(Operation::Union, &lhs, &rhs, &options()),
        Err(CsgError::MaterialCountMismatch {
            materials: 2,
            submeshes: 1
        })
    );
}
