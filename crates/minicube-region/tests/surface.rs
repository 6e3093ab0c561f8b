use minicube_geom::Vec3;
use minicube_region::coords::{CELL_SIZE, FINE_DEPTH, REGION_EXTENT};
use minicube_region::{CubeId, Face, FineCoord, RegionGraph, RegionId};

const STONE: CubeId = CubeId(1);

fn fc(x: usize, y: usize, z: usize) -> FineCoord {
    FineCoord::new(x, y, z).unwrap()
}

fn vertex(g: &RegionGraph, id: RegionId, i: usize) -> Vec3 {
    let p = &g.get(id).unwrap().mesh().positions()[i * 3..i * 3 + 3];
    Vec3::new(p[0], p[1], p[2])
}

#[test]
fn fresh_region_reads_air_and_has_empty_mesh() {
    let mut g = RegionGraph::new();
    let a = g.insert(Vec3::ZERO);
    for c in FineCoord::iter_all() {
        assert!(g.resolve(a, c.x() as i32, c.y() as i32, c.z() as i32).is_air());
    }
    let r = g.get(a).unwrap();
    assert!(r.mesh().is_empty());
    assert_eq!(r.mesh().vertex_count(), 0);
    let stats = g.rebuild_mesh(a).unwrap();
    assert_eq!(stats.faces, 0);
}

#[test]
fn solid_unconnected_region_exposes_its_shell() {
    let mut g = RegionGraph::new();
    let a = g.insert(Vec3::ZERO);
    assert!(g.fill(a, STONE).unwrap());
    let mesh = g.get(a).unwrap().mesh();
    let n = FINE_DEPTH * FINE_DEPTH;
    assert_eq!(mesh.face_count(), 6 * n);
    assert_eq!(mesh.face_count(), 6144);
    assert_eq!(mesh.index_count(), 36864);
    assert_eq!(mesh.vertex_count(), 24576);
}

#[test]
fn solid_region_buried_in_solid_neighbors_has_no_faces() {
    let mut g = RegionGraph::new();
    let center = g.insert(Vec3::ZERO);
    for face in Face::ALL {
        let n = g.insert(face.normal() * REGION_EXTENT);
        g.connect(center, n, face).unwrap();
        g.fill(n, STONE).unwrap();
    }
    g.fill(center, STONE).unwrap();
    assert_eq!(g.get(center).unwrap().mesh().face_count(), 0);
    // Each neighbor still shows its five open sides.
    for (_, n) in g.get(center).unwrap().neighbors().iter() {
        assert_eq!(g.get(n).unwrap().mesh().face_count(), 5 * FINE_DEPTH * FINE_DEPTH);
    }
}

#[test]
fn repeated_fill_does_not_rebuild() {
    let mut g = RegionGraph::new();
    let a = g.insert(Vec3::ZERO);
    assert!(g.fill(a, STONE).unwrap());
    let rev = g.get(a).unwrap().mesh().revision();
    let ptr = g.get(a).unwrap().mesh().indices().as_ptr();
    assert!(!g.fill(a, STONE).unwrap());
    let mesh = g.get(a).unwrap().mesh();
    assert_eq!(mesh.revision(), rev);
    assert_eq!(mesh.indices().as_ptr(), ptr);
}

#[test]
fn single_voxel_emits_faces_in_fixed_order() {
    let mut g = RegionGraph::new();
    let a = g.insert(Vec3::new(8.0, 0.0, 0.0));
    g.set_voxel(a, STONE, fc(0, 0, 0)).unwrap();
    let mesh = g.get(a).unwrap().mesh();
    assert_eq!(mesh.face_count(), 6);
    let center = fc(0, 0, 0).center(Vec3::new(8.0, 0.0, 0.0));
    assert_eq!(center, Vec3::new(8.125, 7.875, 0.125));
    // Face k owns vertices 4k..4k+4 and they sit on that face's plane.
    for (k, face) in Face::ALL.into_iter().enumerate() {
        for v in 0..4 {
            let d = vertex(&g, a, k * 4 + v) - center;
            assert_eq!(d.dot(face.normal()), CELL_SIZE / 2.0, "{:?}", face);
        }
    }
}

#[test]
fn adjacent_voxels_hide_shared_faces() {
    let mut g = RegionGraph::new();
    let a = g.insert(Vec3::ZERO);
    g.set_voxel(a, STONE, fc(4, 4, 4)).unwrap();
    g.set_voxel(a, STONE, fc(4, 5, 4)).unwrap();
    assert_eq!(g.get(a).unwrap().mesh().face_count(), 10);
}

#[test]
fn boundary_edit_rebuilds_neighbor() {
    let mut g = RegionGraph::new();
    let a = g.insert(Vec3::ZERO);
    let b = g.insert(Vec3::new(0.0, 0.0, REGION_EXTENT));
    g.connect(a, b, Face::Front).unwrap();
    g.set_voxel(b, STONE, fc(3, 3, 0)).unwrap();
    assert_eq!(g.get(b).unwrap().mesh().face_count(), 6);
    let b_rev = g.get(b).unwrap().mesh().revision();

    // Touching voxel across the seam hides one face on each side.
    g.set_voxel(a, STONE, fc(3, 3, FINE_DEPTH - 1)).unwrap();
    assert_eq!(g.get(a).unwrap().mesh().face_count(), 5);
    assert_eq!(g.get(b).unwrap().mesh().face_count(), 5);
    assert!(g.get(b).unwrap().mesh().revision() > b_rev);
}

#[test]
fn vertical_seam_uses_inverted_y() {
    let mut g = RegionGraph::new();
    let lower = g.insert(Vec3::ZERO);
    let upper = g.insert(Vec3::new(0.0, REGION_EXTENT, 0.0));
    g.connect(lower, upper, Face::Top).unwrap();
    // Top layer of the lower region touches the bottom layer of the upper one.
    g.set_voxel(lower, STONE, fc(7, 0, 7)).unwrap();
    g.set_voxel(upper, STONE, fc(7, FINE_DEPTH - 1, 7)).unwrap();
    assert_eq!(g.get(lower).unwrap().mesh().face_count(), 5);
    assert_eq!(g.get(upper).unwrap().mesh().face_count(), 5);
    let lo = fc(7, 0, 7).center(Vec3::ZERO);
    let hi = fc(7, FINE_DEPTH - 1, 7).center(Vec3::new(0.0, REGION_EXTENT, 0.0));
    assert_eq!(hi.y - lo.y, CELL_SIZE);
}

#[test]
fn connect_alone_does_not_rebuild() {
    let mut g = RegionGraph::new();
    let a = g.insert(Vec3::ZERO);
    let b = g.insert(Vec3::new(REGION_EXTENT, 0.0, 0.0));
    g.fill(a, STONE).unwrap();
    g.fill(b, STONE).unwrap();
    let rev = g.get(a).unwrap().mesh().revision();
    g.connect(a, b, Face::Right).unwrap();
    assert_eq!(g.get(a).unwrap().mesh().revision(), rev);
    assert_eq!(g.get(a).unwrap().mesh().face_count(), 6144);
    // An explicit rebuild picks up the new occlusion.
    let stats = g.rebuild_with_neighbors(a).unwrap();
    assert_eq!(stats.faces, 5 * FINE_DEPTH * FINE_DEPTH);
    assert_eq!(g.get(b).unwrap().mesh().face_count(), 5 * FINE_DEPTH * FINE_DEPTH);
}

#[test]
fn coarse_block_meshes_as_two_cubed() {
    let mut g = RegionGraph::new();
    let a = g.insert(Vec3::ZERO);
    let cc = minicube_region::CoarseCoord::new(2, 2, 2).unwrap();
    assert!(g.set_cube(a, STONE, cc).unwrap());
    // 6 sides of a 2x2x2 block, 4 quads each.
    assert_eq!(g.get(a).unwrap().mesh().face_count(), 24);
    assert!(!g.set_cube(a, STONE, cc).unwrap());
}

#[test]
fn refilling_with_air_clears_mesh() {
    let mut g = RegionGraph::new();
    let a = g.insert(Vec3::ZERO);
    g.fill(a, STONE).unwrap();
    assert!(g.fill(a, CubeId::AIR).unwrap());
    assert!(g.get(a).unwrap().mesh().is_empty());
}
