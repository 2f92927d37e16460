use crate::*;
use paste::paste;
use std::fmt::{self, Debug, Formatter};

// Flavor and orientation tags. There is no behavioral polymorphism between
// the variants, only data, so these are plain enums on flat records.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexFlavor {
    Normal,
    /// Not attached to any real edge; carries a degenerate self-looped
    /// wire edge so the structure stays uniform.
    Isolated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeFlavor {
    Normal,
    /// Dangling curve edge, bounded by a degenerate face.
    Wire,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PEdgeOrientation {
    /// Same direction as the child edge.
    Forward,
    /// Opposite direction from the child edge.
    Reversed,
    /// The single p-edge of an isolated vertex's self-loop.
    #[default]
    Unoriented,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PFaceOrientation {
    /// Same orientation as the child face normal.
    Forward,
    /// Opposite orientation from the child face normal.
    Reversed,
    /// Degenerate p-face of a wire edge; never mated.
    Wire,
    /// Degenerate p-face of an isolated vertex; never mated.
    Isolated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionFlavor {
    Empty,
    Filled,
}

// The entities themselves. All cross-references are handles; `None` marks
// the end of a linear list (`next_hole`, `next_void_shell`, `mate_pface`)
// or a link that an operator has not wired up yet. Ring links are `Some`
// on every entity an operator has returned.

#[derive(Debug)]
pub struct Vertex<V> {
    pub flavor: VertexFlavor,
    /// One of the p-vertices using this vertex; entry into the vertex ring.
    pub pvertex: Option<PVertexId>,
    pub point: V,
}

#[derive(Debug, Default)]
pub struct PVertex {
    /// A representative edge incident at this vertex use.
    pub parent_edge: Option<EdgeId>,
    pub vertex: Option<VertexId>,
    /// Cyclic ring of all p-vertices sharing the child vertex.
    pub next_pvertex: Option<PVertexId>,
}

#[derive(Debug)]
pub struct Edge {
    pub flavor: EdgeFlavor,
    /// One of the radial p-edges; entry into the radial ring.
    pub parent_pedge: Option<PEdgeId>,
    pub start_pvertex: Option<PVertexId>,
    pub end_pvertex: Option<PVertexId>,
}

#[derive(Debug, Default)]
pub struct PEdge {
    pub orientation: PEdgeOrientation,
    pub parent_loop: Option<LoopId>,
    pub child_edge: Option<EdgeId>,
    /// The p-vertex at this p-edge's source, in loop direction.
    pub start_pvertex: Option<PVertexId>,
    pub loop_prev: Option<PEdgeId>,
    pub loop_next: Option<PEdgeId>,
    pub radial_prev: Option<PEdgeId>,
    pub radial_next: Option<PEdgeId>,
}

#[derive(Debug, Default)]
pub struct Loop {
    pub parent_face: Option<FaceId>,
    /// A p-edge along the boundary; entry into the loop ring.
    pub boundary_pedge: Option<PEdgeId>,
    /// Linked list of inner (hole) loops of the same face.
    pub next_hole: Option<LoopId>,
}

#[derive(Debug, Default)]
pub struct Face {
    /// One of the (at most two) p-faces using this face.
    pub parent_pface: Option<PFaceId>,
    pub outer_loop: Option<LoopId>,
}

#[derive(Debug)]
pub struct PFace {
    pub orientation: PFaceOrientation,
    pub parent_shell: Option<ShellId>,
    pub child_face: Option<FaceId>,
    /// Cyclic ring of p-faces bounding the same shell.
    pub next_pface: Option<PFaceId>,
    /// The p-face on the other side of the child face; `None` iff the
    /// child face is degenerate.
    pub mate_pface: Option<PFaceId>,
}

#[derive(Debug, Default)]
pub struct Shell {
    pub parent_region: Option<RegionId>,
    /// Entry into the shell ring; `None` on a freshly made outer shell.
    pub pface: Option<PFaceId>,
    /// Singly-linked list of extra shells (voids, wire and point
    /// components), threaded off a region's outer shell.
    pub next_void_shell: Option<ShellId>,
}

#[derive(Debug)]
pub struct Region {
    pub flavor: RegionFlavor,
    pub outer_shell: Option<ShellId>,
}

/// A typed free-list pool. Handles are indices into `slots`; freed slots
/// are recycled in LIFO order. Reading a currently-free slot panics.
pub(crate) struct Pool<T> {
    slots: Vec<Option<T>>,
    free: Vec<u32>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }
}

impl<T> Pool<T> {
    pub fn alloc(&mut self, item: T) -> u32 {
        if let Some(index) = self.free.pop() {
            self.slots[index as usize] = Some(item);
            index
        } else {
            self.slots.push(Some(item));
            (self.slots.len() - 1) as u32
        }
    }

    pub fn free(&mut self, index: u32) -> T {
        let item = self.slots[index as usize].take().expect("double free");
        self.free.push(index);
        item
    }

    pub fn get(&self, index: u32) -> &T {
        self.slots[index as usize].as_ref().expect("stale handle")
    }

    pub fn get_mut(&mut self, index: u32) -> &mut T {
        self.slots[index as usize].as_mut().expect("stale handle")
    }

    pub fn try_get(&self, index: u32) -> Option<&T> {
        self.slots.get(index as usize).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|item| (index as u32, item)))
    }
}

macro_rules! entities {
	($($Id:ident, $getter:ident, $stem:ident, $plural:ident: $T:ty;)*) => { paste! {
		$(
			#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
			pub struct $Id(pub(crate) u32);

			impl Debug for $Id {
				fn fmt(&self, f: &mut Formatter) -> fmt::Result {
					let name = stringify!($Id);
					f.debug_tuple(&name[..name.len() - 2]).field(&self.0).finish()
				}
			}

			impl<V> PeMesh<V> {
				pub fn $getter(&self, id: $Id) -> &$T {
					self.$plural.get(id.0)
				}

				pub(crate) fn [<$stem _mut>](&mut self, id: $Id) -> &mut $T {
					self.$plural.get_mut(id.0)
				}

				pub(crate) fn [<try_ $stem>](&self, id: $Id) -> Option<&$T> {
					self.$plural.try_get(id.0)
				}

				pub(crate) fn [<alloc_ $stem>](&mut self, item: $T) -> $Id {
					$Id(self.$plural.alloc(item))
				}

				pub(crate) fn [<free_ $stem>](&mut self, id: $Id) -> $T {
					self.$plural.free(id.0)
				}

				pub fn [<$stem _count>](&self) -> usize {
					self.$plural.len()
				}

				pub fn $plural(&self) -> impl Iterator<Item = ($Id, &$T)> {
					self.$plural.iter().map(|(index, item)| ($Id(index), item))
				}
			}
		)*
	}};
}

entities! {
    VertexId, vertex, vertex, vertices: Vertex<V>;
    PVertexId, pvertex, pvertex, pvertices: PVertex;
    EdgeId, edge, edge, edges: Edge;
    PEdgeId, pedge, pedge, pedges: PEdge;
    LoopId, loop_, loop, loops: Loop;
    FaceId, face, face, faces: Face;
    PFaceId, pface, pface, pfaces: PFace;
    ShellId, shell, shell, shells: Shell;
    RegionId, region, region, regions: Region;
}
