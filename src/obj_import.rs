use crate::*;
pub use obj;
use obj::raw::object::{Polygon, RawObj};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObjImportError {
    #[error("vertex {0} position index out of bounds")]
    InvalidPositionIndex(usize),
    #[error("polygon {0} has fewer than three vertices")]
    PolygonTooSmall(usize),
    #[error("polygon {0} repeats a vertex")]
    DegeneratePolygon(usize),
}

use ObjImportError::*;

fn iter_polygon(p: &Polygon) -> impl DoubleEndedIterator<Item = usize> + '_ {
    use either::{Left, Right};

    match p {
        Polygon::P(v) => Left(Left(v.iter().cloned())),
        Polygon::PT(v) => Left(Right(v.iter().map(|&(x, _)| x))),
        Polygon::PN(v) => Right(Left(v.iter().map(|&(x, _)| x))),
        Polygon::PTN(v) => Right(Right(v.iter().map(|&(x, _, _)| x))),
    }
}

/// Builds a mesh from a polygon soup: every position becomes an isolated
/// vertex, then each polygon is lifted into a real face on the region's
/// outer shell, which unwraps the isolated vertices as they get used.
/// Unreferenced positions simply stay isolated. On any error the partial
/// build is dropped wholesale.
///
/// Unlike a half-edge import there is no winding to fix up and no twin
/// matching: radial rings take any number of faces per edge, in either
/// direction.
pub fn import_obj<V>(
    raw: &RawObj,
    fun: impl Fn((f32, f32, f32, f32)) -> V,
) -> Result<(PeMesh<V>, RegionId), ObjImportError> {
    let mut mesh = PeMesh::new();
    let region = mesh.create_empty_region();

    let vertices: Vec<VertexId> = raw
        .positions
        .iter()
        .map(|&position| mesh.create_isolated_vertex(region, fun(position)).0)
        .collect();

    for (index, polygon) in raw.polygons.iter().enumerate() {
        let mut cycle = Vec::new();
        for position in iter_polygon(polygon) {
            let vertex = *vertices.get(position).ok_or(InvalidPositionIndex(position + 1))?;
            if cycle.contains(&vertex) {
                return Err(DegeneratePolygon(index));
            }
            cycle.push(vertex);
        }
        if cycle.len() < 3 {
            return Err(PolygonTooSmall(index));
        }

        let shell = mesh.ensure_outer_shell(region);
        mesh.add_polygon_face(shell, &cycle);
    }

    Ok((mesh, region))
}
