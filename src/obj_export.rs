use crate::*;

/// Streams the mesh out as Wavefront OBJ. Every vertex is written (wire
/// chains and isolated points keep their `v` records), but only real
/// faces produce `f` records; degenerate faces are display scaffolding
/// and are skipped. Each face's record is its outer-loop boundary walk,
/// which is exactly what display tessellation consumes.
pub struct ObjExport<'tok, V, W, VPos> {
    writer: &'tok mut W,
    mesh: &'tok PeMesh<V>,
    vertex_pos: VPos,
    pos_ids: Vec<Option<usize>>,
}

impl<'tok, V, W, VPos> ObjExport<'tok, V, W, VPos>
where
    W: std::io::Write,
    VPos: FnMut(&V) -> (f64, f64, f64),
{
    pub fn export(
        writer: &'tok mut W,
        mesh: &'tok PeMesh<V>,
        vertex_pos: VPos,
    ) -> std::io::Result<()> {
        Self {
            writer,
            mesh,
            vertex_pos,
            pos_ids: Vec::new(),
        }
        .write()
    }

    fn write(&mut self) -> std::io::Result<()> {
        let mut next_id = 1;
        for (id, vertex) in self.mesh.vertices() {
            let index = id.0 as usize;
            if index >= self.pos_ids.len() {
                self.pos_ids.resize(index + 1, None);
            }
            self.pos_ids[index] = Some(next_id);
            next_id += 1;

            let (x, y, z) = (self.vertex_pos)(&vertex.point);
            writeln!(self.writer, "v {x} {y} {z}")?;
        }

        for (id, _) in self.mesh.faces() {
            if self.mesh.is_degenerate_face(id) {
                continue;
            }

            write!(self.writer, "f")?;
            for vertex in self.mesh.face_boundary(id) {
                let obj_id = self.pos_ids[vertex.0 as usize].unwrap();
                write!(self.writer, " {obj_id}")?;
            }
            writeln!(self.writer)?;
        }

        Ok(())
    }
}
