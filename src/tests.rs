use crate::*;

fn entity_counts<V>(mesh: &PeMesh<V>) -> [usize; 9] {
    [
        mesh.vertex_count(),
        mesh.pvertex_count(),
        mesh.edge_count(),
        mesh.pedge_count(),
        mesh.loop_count(),
        mesh.face_count(),
        mesh.pface_count(),
        mesh.shell_count(),
        mesh.region_count(),
    ]
}

/// An open wire chain v0..v3 closed into a quad cycle.
fn wire_quad(mesh: &mut PeMesh<u32>) -> (RegionId, [VertexId; 4], [EdgeId; 4]) {
    let region = mesh.create_empty_region();
    let (v0, shell) = mesh.create_isolated_vertex(region, 0);
    let e0 = mesh.create_wire_edge_and_vertex(shell, v0, 1);
    let v1 = mesh.edge_vertices(e0)[1];
    let e1 = mesh.create_wire_edge_and_vertex(shell, v1, 2);
    let v2 = mesh.edge_vertices(e1)[1];
    let e2 = mesh.create_wire_edge_and_vertex(shell, v2, 3);
    let v3 = mesh.edge_vertices(e2)[1];
    let e3 = mesh.make_edge_cycle(shell, v3, v0);

    assert!(mesh.validate());
    assert!(mesh.validate_edge_cycle(&[e0, e1, e2, e3]));

    (region, [v0, v1, v2, v3], [e0, e1, e2, e3])
}

#[test]
fn region_round_trip() {
    let mut mesh = PeMesh::<u32>::new();

    let region = mesh.create_empty_region();
    assert_eq!(mesh.region_count(), 1);
    assert!(mesh.region_is_empty(region));
    assert!(mesh.validate());

    mesh.delete_empty_region(region);
    assert_eq!(mesh.region_count(), 0);
    assert_eq!(mesh.shell_count(), 0);
}

#[test]
fn isolated_vertex_round_trip() {
    let mut mesh = PeMesh::<u32>::new();
    let region = mesh.create_empty_region();

    let (vertex, shell) = mesh.create_isolated_vertex(region, 7);
    assert!(mesh.is_isolated(vertex));
    assert_eq!(mesh.vertex_ring(vertex).count(), 1);
    assert!(!mesh.region_is_empty(region));
    assert!(mesh.validate());

    // The degenerate chain is fully built: vertex, p-vertex, self-looped
    // wire edge, p-edge, loop, face, p-face, and a void shell besides the
    // outer shell.
    assert_eq!(entity_counts(&mesh), [1, 1, 1, 1, 1, 1, 1, 2, 1]);

    let pvertex = mesh.vertex(vertex).pvertex.unwrap();
    assert!(mesh.validate_vertex(vertex));
    assert!(mesh.validate_pvertex(pvertex));
    let edge = mesh.pvertex(pvertex).parent_edge.unwrap();
    assert!(mesh.is_wire_edge(edge));
    assert!(mesh.validate_edge(edge));
    let pedge = mesh.edge(edge).parent_pedge.unwrap();
    assert!(mesh.validate_pedge(pedge));
    let loop_ = mesh.pedge(pedge).parent_loop.unwrap();
    assert!(mesh.validate_loop(loop_));
    assert_eq!(mesh.loop_ring(loop_).count(), 1);
    assert_eq!(mesh.radial_ring(edge).count(), 1);
    let outer = mesh.region(region).outer_shell.unwrap();
    assert!(mesh.void_shells(outer).eq([shell]));

    assert_eq!(mesh.delete_isolated_vertex(vertex), 7);
    assert_eq!(entity_counts(&mesh), [0, 0, 0, 0, 0, 0, 0, 1, 1]);
    assert!(mesh.region_is_empty(region));
    assert!(mesh.validate());

    mesh.delete_empty_region(region);
    assert_eq!(mesh.shell_count(), 0);
    assert_eq!(mesh.region_count(), 0);
}

#[test]
fn wire_edges_share_a_vertex() {
    let mut mesh = PeMesh::<u32>::new();
    let region = mesh.create_empty_region();
    let (vertex, shell) = mesh.create_isolated_vertex(region, 0);

    // The first wire edge unwraps the self-loop in place.
    let e1 = mesh.create_wire_edge_and_vertex(shell, vertex, 1);
    assert!(!mesh.is_isolated(vertex));
    assert!(mesh.is_wire_edge(e1));
    assert_eq!(mesh.radial_ring(e1).count(), 2);
    assert!(mesh.validate());

    // The second one grows a fresh component off the shared vertex.
    let e2 = mesh.create_wire_edge_and_vertex(shell, vertex, 2);
    assert_eq!(mesh.vertex_ring(vertex).count(), 2);
    assert_eq!(mesh.incident_edge_count(vertex), 2);
    assert!(mesh.validate());

    let tip2 = mesh.edge_vertices(e2)[1];
    assert_eq!(mesh.delete_wire_edge_and_vertex(e2, tip2), 2);
    assert_eq!(mesh.vertex_ring(vertex).count(), 1);
    assert!(mesh.validate());

    let tip1 = mesh.edge_vertices(e1)[1];
    assert_eq!(mesh.delete_wire_edge_and_vertex(e1, tip1), 1);
    assert!(mesh.is_isolated(vertex));
    assert!(mesh.validate());

    mesh.delete_isolated_vertex(vertex);
    mesh.delete_empty_region(region);
    assert_eq!(entity_counts(&mesh), [0; 9]);
}

#[test]
fn wire_triangle_cycle() {
    let mut mesh = PeMesh::<u32>::new();
    let region = mesh.create_empty_region();

    let (v0, shell) = mesh.create_isolated_vertex(region, 0);
    let e0 = mesh.create_wire_edge_and_vertex(shell, v0, 1);
    let v1 = mesh.edge_vertices(e0)[1];
    let e1 = mesh.create_wire_edge_and_vertex(shell, v1, 2);
    let v2 = mesh.edge_vertices(e1)[1];

    // Deliberately orienting e2 against e0 and e1.
    let e2 = mesh.make_edge_cycle(shell, v0, v2);
    assert!(mesh.validate());
    assert!(mesh.validate_edge_cycle(&[e0, e1, e2]));
    for vertex in [v0, v1, v2] {
        assert_eq!(mesh.incident_edge_count(vertex), 2);
    }

    // Take it apart again, validating after each step.
    mesh.delete_edge_cycle(e2);
    assert!(mesh.validate());
    assert_eq!(mesh.incident_edge_count(v0), 1);
    assert_eq!(mesh.incident_edge_count(v2), 1);

    mesh.delete_wire_edge_and_vertex(e1, v2);
    assert!(mesh.validate());
    assert_eq!(mesh.incident_edge_count(v1), 1);

    mesh.delete_wire_edge_and_vertex(e0, v1);
    assert!(mesh.validate());
    assert!(mesh.is_isolated(v0));

    mesh.delete_isolated_vertex(v0);
    assert!(mesh.region_is_empty(region));
    mesh.delete_empty_region(region);
    assert_eq!(entity_counts(&mesh), [0; 9]);
}

#[test]
fn quad_face_from_wire_cycle() {
    let mut mesh = PeMesh::<u32>::new();
    let (region, verts, edges) = wire_quad(&mut mesh);
    let [v0, v1, v2, v3] = verts;

    let outer = mesh.region(region).outer_shell.unwrap();
    let face = mesh.add_polygon_face(outer, &[v0, v1, v2, v3]);
    assert!(mesh.validate());

    // One p-edge per boundary edge; the wire scaffolding is gone.
    let loop_ = mesh.face(face).outer_loop.unwrap();
    assert_eq!(mesh.loop_ring(loop_).count(), 4);
    assert!(mesh.face_boundary(face).eq([v0, v1, v2, v3]));
    assert_eq!(mesh.loop_count(), 1);
    assert_eq!(mesh.shell_count(), 1);
    assert!(mesh.void_shells(outer).next().is_none());
    for edge in edges {
        assert!(!mesh.is_wire_edge(edge));
        assert_eq!(mesh.radial_ring(edge).count(), 1);
    }

    // Exactly two p-faces, mated to each other.
    assert!(!mesh.is_degenerate_face(face));
    assert_eq!(mesh.pface_count(), 2);
    let pface = mesh.face(face).parent_pface.unwrap();
    let mate = mesh.pface(pface).mate_pface.unwrap();
    assert_eq!(mesh.pface(mate).mate_pface, Some(pface));
    assert_eq!(mesh.shell_ring(outer).count(), 2);
}

#[test]
fn spur_round_trip() {
    let mut mesh = PeMesh::<u32>::new();
    let (region, verts, _) = wire_quad(&mut mesh);
    let outer = mesh.region(region).outer_shell.unwrap();
    let face = mesh.add_polygon_face(outer, &verts);
    let loop_ = mesh.face(face).outer_loop.unwrap();
    let v1 = verts[1];

    let counts = entity_counts(&mesh);
    let spur = mesh.create_edge_in_loop(loop_, v1, 9);
    assert!(mesh.validate());

    // The spur edge appears twice on the ring: out to the new vertex and
    // back.
    assert_eq!(mesh.loop_ring(loop_).count(), 6);
    assert_eq!(mesh.radial_ring(spur).count(), 2);
    let [near, tip] = mesh.edge_vertices(spur);
    assert_eq!(near, v1);
    assert_eq!(mesh.incident_edge_count(tip), 1);
    assert_eq!(mesh.incident_edge_count(v1), 3);
    assert_eq!(mesh.vertex_ring(tip).count(), 1);

    assert_eq!(mesh.delete_edge_from_loop(spur), 9);
    assert!(mesh.validate());
    assert_eq!(mesh.loop_ring(loop_).count(), 4);
    assert_eq!(mesh.incident_edge_count(v1), 2);
    assert_eq!(entity_counts(&mesh), counts);
}

#[test]
fn split_and_join_single_face() {
    let mut mesh = PeMesh::<u32>::new();
    let (region, verts, edges) = wire_quad(&mut mesh);
    let outer = mesh.region(region).outer_shell.unwrap();
    let face = mesh.add_polygon_face(outer, &verts);
    let loop_ = mesh.face(face).outer_loop.unwrap();

    let counts = entity_counts(&mesh);
    let edge = edges[1];

    let w = mesh.split_edge_create_vertex(edge, 9);
    assert!(mesh.validate());
    assert_eq!(mesh.loop_ring(loop_).count(), 5);
    assert_eq!(mesh.vertex_ring(w).count(), 1);
    assert_eq!(mesh.incident_edge_count(w), 2);
    assert!(mesh.face_boundary(face).any(|v| v == w));

    mesh.delete_vertex_join_edge(w, edge);
    assert!(mesh.validate());
    assert_eq!(mesh.loop_ring(loop_).count(), 4);
    assert!(mesh.face_boundary(face).eq(verts));
    assert_eq!(entity_counts(&mesh), counts);
}

#[test]
fn split_and_join_shared_edge() {
    let mut mesh = PeMesh::<u32>::new();
    let region = mesh.create_empty_region();
    let verts: Vec<VertexId> = (0..6)
        .map(|point| mesh.create_isolated_vertex(region, point).0)
        .collect();
    let (a, b, c) = (verts[0], verts[1], verts[2]);
    let (d, e, f) = (verts[3], verts[4], verts[5]);

    let outer = mesh.region(region).outer_shell.unwrap();
    let face1 = mesh.add_polygon_face(outer, &[a, b, c, d]);
    // Consistent winding: the neighbor traverses the shared edge the
    // other way around.
    let face2 = mesh.add_polygon_face(outer, &[b, a, e, f]);
    assert!(mesh.validate());

    let shared = mesh.find_edge_between(a, b).unwrap();
    assert_eq!(mesh.radial_ring(shared).count(), 2);
    assert_eq!(mesh.pface_count(), 4);
    assert_eq!(mesh.shell_ring(outer).count(), 4);
    assert_eq!(mesh.shell_count(), 1);

    let loop1 = mesh.face(face1).outer_loop.unwrap();
    let loop2 = mesh.face(face2).outer_loop.unwrap();
    let counts = entity_counts(&mesh);

    // Splitting the shared edge relinks every radial p-edge: both loops
    // grow by one member.
    let w = mesh.split_edge_create_vertex(shared, 9);
    assert!(mesh.validate());
    assert_eq!(mesh.loop_ring(loop1).count(), 5);
    assert_eq!(mesh.loop_ring(loop2).count(), 5);
    assert_eq!(mesh.vertex_ring(w).count(), 1);
    assert_eq!(mesh.incident_edge_count(w), 2);
    let halves = mesh.visit_vertex_edges(w);
    for half in &halves {
        assert_eq!(mesh.radial_ring(*half).count(), 2);
    }
    assert!(mesh.face_boundary(face1).any(|v| v == w));
    assert!(mesh.face_boundary(face2).any(|v| v == w));

    mesh.delete_vertex_join_edge(w, shared);
    assert!(mesh.validate());
    assert_eq!(mesh.loop_ring(loop1).count(), 4);
    assert_eq!(mesh.loop_ring(loop2).count(), 4);
    assert_eq!(entity_counts(&mesh), counts);
}

#[test]
fn checker_reports_broken_invariants() {
    let mut mesh = PeMesh::<u32>::new();
    let (region, verts, _) = wire_quad(&mut mesh);
    let outer = mesh.region(region).outer_shell.unwrap();
    let face = mesh.add_polygon_face(outer, &verts);
    assert!(mesh.check_mesh().is_ok());

    // Orphan one side of the mate pair.
    let pface = mesh.face(face).parent_pface.unwrap();
    let mate = mesh.pface(pface).mate_pface.unwrap();
    mesh.pface_mut(pface).mate_pface = None;
    assert_eq!(mesh.check_pface(pface), Err(CheckError::MateMissing(pface)));
    assert_eq!(mesh.check_pface(mate), Err(CheckError::MateAsymmetric(mate)));
    assert!(mesh.check_mesh().is_err());
    mesh.pface_mut(pface).mate_pface = Some(mate);
    assert!(mesh.check_mesh().is_ok());

    // Short-circuit the loop ring.
    let loop_ = mesh.face(face).outer_loop.unwrap();
    let boundary = mesh.loop_(loop_).boundary_pedge.unwrap();
    let saved = mesh.pedge(boundary).loop_next.unwrap();
    mesh.pedge_mut(boundary).loop_next = Some(boundary);
    assert_eq!(
        mesh.check_loop(loop_),
        Err(CheckError::LoopRingBroken(boundary))
    );
    mesh.pedge_mut(boundary).loop_next = Some(saved);
    assert!(mesh.check_mesh().is_ok());

    // Point a p-vertex at the wrong vertex.
    let [v0, v1, ..] = verts;
    let pvertex = mesh.vertex(v0).pvertex.unwrap();
    mesh.pvertex_mut(pvertex).vertex = Some(v1);
    assert!(matches!(
        mesh.check_vertex(v0),
        Err(CheckError::VertexRingMismatch { .. })
    ));
    mesh.pvertex_mut(pvertex).vertex = Some(v0);
    assert!(mesh.check_mesh().is_ok());
}

#[test]
fn dot_dump_mentions_every_edge() {
    use std::fmt;

    let mut mesh = PeMesh::<u32>::new();
    let (_, _, edges) = wire_quad(&mut mesh);

    struct Dump<'tok>(&'tok PeMesh<u32>);
    impl fmt::Display for Dump<'_> {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            mesh_write_dot(
                self.0,
                |&point| [point as f64, 0.0],
                |point, f| write!(f, "{point}"),
                f,
                MeshDotOptions::all(),
            )
        }
    }

    let text = format!("{}", Dump(&mesh));
    assert!(text.starts_with("digraph"));
    for edge in edges {
        assert!(text.contains(&format!("e{}", edge.0)));
    }
}

#[cfg(feature = "obj_import")]
mod obj_round_trips {
    use super::*;

    const CUBE: &str = "\
v -1 -1 -1
v -1 -1 1
v -1 1 -1
v -1 1 1
v 1 -1 -1
v 1 -1 1
v 1 1 -1
v 1 1 1
f 1 2 4 3
f 5 7 8 6
f 1 5 6 2
f 3 4 8 7
f 1 3 7 5
f 2 6 8 4
";

    fn parse(source: &str) -> obj::raw::object::RawObj {
        obj::raw::parse_obj(source.as_bytes()).unwrap()
    }

    #[test]
    fn cube_import() {
        let raw = parse(CUBE);
        let (mesh, region) = import_obj(&raw, |(x, y, z, _)| (x, y, z)).unwrap();

        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.edge_count(), 12);
        assert_eq!(mesh.face_count(), 6);
        assert_eq!(mesh.pface_count(), 12);
        assert_eq!(mesh.loop_count(), 6);
        assert_eq!(mesh.shell_count(), 1);
        assert!(mesh.validate());

        // Closed manifold: every edge is shared by exactly two faces, and
        // every face is a quad.
        for (edge, _) in mesh.edges() {
            assert!(!mesh.is_wire_edge(edge));
            assert_eq!(mesh.radial_ring(edge).count(), 2);
        }
        for (face, _) in mesh.faces() {
            assert!(!mesh.is_degenerate_face(face));
            assert_eq!(mesh.face_boundary(face).count(), 4);
        }
        for (vertex, _) in mesh.vertices() {
            assert_eq!(mesh.incident_edge_count(vertex), 3);
        }

        let outer = mesh.region(region).outer_shell.unwrap();
        assert_eq!(mesh.shell_ring(outer).count(), 12);
        assert!(mesh.void_shells(outer).next().is_none());
    }

    #[test]
    fn cube_export_round_trip() {
        let raw = parse(CUBE);
        let (mesh, _) = import_obj(&raw, |(x, y, z, _)| (x, y, z)).unwrap();

        let mut out = Vec::new();
        ObjExport::export(&mut out, &mesh, |&(x, y, z)| {
            (x as f64, y as f64, z as f64)
        })
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 8);
        assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 6);

        let (back, _) = import_obj(&parse(&text), |(x, y, z, _)| (x, y, z)).unwrap();
        assert_eq!(back.vertex_count(), 8);
        assert_eq!(back.edge_count(), 12);
        assert_eq!(back.face_count(), 6);
        assert!(back.validate());
    }

    #[test]
    fn import_rejects_bad_polygons() {
        let raw = parse("v 0 0 0\nv 1 0 0\nf 1 2 3\n");
        assert!(matches!(
            import_obj(&raw, |(x, y, z, _)| (x, y, z)),
            Err(ObjImportError::InvalidPositionIndex(3))
        ));

        let raw = parse("v 0 0 0\nv 1 0 0\nf 1 2\n");
        assert!(matches!(
            import_obj(&raw, |(x, y, z, _)| (x, y, z)),
            Err(ObjImportError::PolygonTooSmall(0))
        ));
    }

    #[test]
    fn unreferenced_positions_stay_isolated() {
        let raw = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nv 5 5 5\nf 1 2 3\n");
        let (mesh, region) = import_obj(&raw, |(x, y, z, _)| (x, y, z)).unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(
            mesh.vertices()
                .filter(|&(v, _)| mesh.is_isolated(v))
                .count(),
            1
        );
        let outer = mesh.region(region).outer_shell.unwrap();
        assert_eq!(mesh.void_shells(outer).count(), 1);
        assert!(mesh.validate());
    }
}
