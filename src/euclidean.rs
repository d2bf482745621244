//! Graphs whose nodes sit in the plane.
//!
//! An euclidean graph is an ordinary [`Graph`] whose node payload is a
//! [`Located`] value: a 2-D point plus the user's info. Arcs gain a
//! geometric length, and [`PlaneSummary`] condenses the node set into a
//! bounding box with per-axis scale factors (for mapping onto a drawing
//! surface).

use std::io::{self, Read, Write};

use crate::graph::{ArcId, DefaultIx, Graph, IndexType, NodeId};
use crate::io::BinCodec;
use crate::{EdgeType, Undirected};

/// A point of the plane.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        let (dx, dy) = (self.x - other.x, self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

impl BinCodec for Point {
    fn encode<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        self.x.encode(out)?;
        self.y.encode(out)
    }

    fn decode<R: Read + ?Sized>(input: &mut R) -> io::Result<Self> {
        Ok(Point {
            x: f64::decode(input)?,
            y: f64::decode(input)?,
        })
    }
}

/// A node payload carrying a position along with the user's info.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Located<N> {
    pub position: Point,
    pub info: N,
}

impl<N> Located<N> {
    pub fn new(position: Point, info: N) -> Self {
        Located { position, info }
    }

    pub fn at(x: f64, y: f64, info: N) -> Self {
        Located {
            position: Point::new(x, y),
            info,
        }
    }
}

impl<N: BinCodec> BinCodec for Located<N> {
    fn encode<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        self.position.encode(out)?;
        self.info.encode(out)
    }

    fn decode<R: Read + ?Sized>(input: &mut R) -> io::Result<Self> {
        Ok(Located {
            position: Point::decode(input)?,
            info: N::decode(input)?,
        })
    }
}

/// An undirected graph whose nodes carry 2-D coordinates.
pub type EuclideanGraph<N, A, Ix = DefaultIx> = Graph<Located<N>, A, Undirected, Ix>;

/// The position of node `n`.
pub fn position<N, A, Ty, Ix>(g: &Graph<Located<N>, A, Ty, Ix>, n: NodeId<Ix>) -> Option<Point>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    g.node_info(n).map(|located| located.position)
}

/// The euclidean length of arc `a`: the distance between its endpoints.
pub fn arc_length<N, A, Ty, Ix>(g: &Graph<Located<N>, A, Ty, Ix>, a: ArcId<Ix>) -> Option<f64>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    let (src, tgt) = g.arc_endpoints(a)?;
    Some(g[src].position.distance(&g[tgt].position))
}

/// Axis-aligned bounding box of a graph's node set, with scale helpers.
///
/// A pure function of the node positions; an empty graph has no summary.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlaneSummary {
    pub min: Point,
    pub max: Point,
}

impl PlaneSummary {
    /// Summarize the node set of `g`.
    pub fn of<N, A, Ty, Ix>(g: &Graph<Located<N>, A, Ty, Ix>) -> Option<Self>
    where
        Ty: EdgeType,
        Ix: IndexType,
    {
        let mut nodes = g.node_infos();
        let first = nodes.next()?.position;
        let mut summary = PlaneSummary {
            min: first,
            max: first,
        };
        for located in nodes {
            let p = located.position;
            summary.min.x = summary.min.x.min(p.x);
            summary.min.y = summary.min.y.min(p.y);
            summary.max.x = summary.max.x.max(p.x);
            summary.max.y = summary.max.y.max(p.y);
        }
        Some(summary)
    }

    /// Extent along the x axis.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along the y axis.
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Per-axis factors mapping the box onto a `target_w` × `target_h`
    /// surface. A degenerate axis maps with factor 1.
    pub fn scale_to(&self, target_w: f64, target_h: f64) -> (f64, f64) {
        let sx = if self.width() > 0.0 {
            target_w / self.width()
        } else {
            1.0
        };
        let sy = if self.height() > 0.0 {
            target_h / self.height()
        } else {
            1.0
        };
        (sx, sy)
    }
}
