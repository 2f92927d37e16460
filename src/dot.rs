use crate::*;
use std::fmt::{self, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshDotOptions {
    pub radial: bool,
    pub loop_next: bool,
    pub vertex_ring: bool,
}

impl MeshDotOptions {
    pub fn none() -> Self {
        Self {
            radial: false,
            loop_next: false,
            vertex_ring: false,
        }
    }

    pub fn all() -> Self {
        Self {
            radial: true,
            loop_next: true,
            vertex_ring: true,
        }
    }
}

/// Writes the mesh as a Graphviz digraph, for eyeballing ring surgery.
/// Vertices become positioned nodes, edges become arrows from start to
/// end, and each p-edge gets a small node of its own so the optional
/// radial (red) and loop (green) links have something to point at.
pub fn mesh_write_dot<V>(
    mesh: &PeMesh<V>,
    pos: impl Fn(&V) -> [f64; 2],
    name: impl Fn(&V, &mut Formatter) -> fmt::Result,
    f: &mut Formatter,
    opt: MeshDotOptions,
) -> fmt::Result {
    writeln!(f, "digraph pemesh {{")?;
    writeln!(f, "node [shape = circle]")?;

    for (id, vertex) in mesh.vertices() {
        let p = pos(&vertex.point);

        write!(f, "vertex_{} [label=\"", id.0)?;
        struct Helper<'tok, V, F>(&'tok V, F);
        impl<V, F: Fn(&V, &mut Formatter) -> fmt::Result> fmt::Display for Helper<'_, V, F> {
            fn fmt(&self, f: &mut Formatter) -> fmt::Result {
                self.1(self.0, f)
            }
        }
        write!(f, "{}", Helper(&vertex.point, &name))?;
        writeln!(f, "\", pos=\"{},{}!\"]", p[0], p[1])?;

        if opt.vertex_ring {
            for pv in mesh.vertex_ring(id) {
                let next = mesh.pvertex(pv).next_pvertex.unwrap();
                writeln!(f, "pvertex_{} -> pvertex_{} [color=\"gray\"]", pv.0, next.0)?;
            }
        }
    }

    for (id, edge) in mesh.edges() {
        let [start, end] = mesh.edge_vertices(id);
        let style = match edge.flavor {
            EdgeFlavor::Normal => "solid",
            EdgeFlavor::Wire => "dashed",
        };
        writeln!(
            f,
            "vertex_{} -> vertex_{} [label=\"e{}\", style={}]",
            start.0, end.0, id.0, style
        )?;

        for pe in mesh.radial_ring(id) {
            writeln!(
                f,
                "pedge_{} [shape=point, width=0.01, height=0.01]",
                pe.0
            )?;

            if opt.radial {
                let next = mesh.pedge(pe).radial_next.unwrap();
                writeln!(f, "pedge_{} -> pedge_{} [color=\"red\"]", pe.0, next.0)?;
            }

            if opt.loop_next {
                let next = mesh.pedge(pe).loop_next.unwrap();
                writeln!(f, "pedge_{} -> pedge_{} [color=\"green\"]", pe.0, next.0)?;
            }
        }
    }

    writeln!(f, "}}")
}
