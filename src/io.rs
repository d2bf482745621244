//! Saving and loading graphs on byte streams.
//!
//! Two framings share one schema:
//!
//! ```text
//! binary (little-endian):             text (whitespace tokens):
//!   u64  num_nodes                      num_nodes num_arcs
//!   num_nodes × node payload            num_nodes × node payload
//!   u64  num_arcs                       num_arcs × (src tgt payload)
//!   num_arcs × (u64 src, u64 tgt,
//!               arc payload)
//! ```
//!
//! Arc endpoints are written as the *ordinal* position in which their node
//! was emitted; the loader rebuilds an ordinal → node table (a plain
//! vector, since ordinals are dense small integers) and resolves arcs
//! through it. Payload bytes are delegated to caller codecs both ways;
//! [`BinCodec`] and the `Display`/`FromStr` adapters cover the common
//! payloads. The framing itself fixes only counts and ordinals, so the
//! directedness of the graph is a property of the loading type, not of
//! the stream.
//!
//! Node and arc filters may be supplied on save to emit a subgraph; arcs
//! with a filtered-out endpoint are dropped with their node. The loader is
//! oblivious to filtering.
//!
//! Progress is reported through `log::debug!`; there is no global
//! verbosity switch.

use std::fmt;
use std::io::{self, Read, Write};
use std::str::FromStr;

use log::debug;

use crate::graph::{Graph, IndexType, NodeId};
use crate::EdgeType;

/// Fixed-width binary encoding of a payload, little-endian throughout.
pub trait BinCodec: Sized {
    fn encode<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()>;
    fn decode<R: Read + ?Sized>(input: &mut R) -> io::Result<Self>;
}

macro_rules! impl_bin_codec {
    ($($t:ident),*) => {
        $(
            impl BinCodec for $t {
                fn encode<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
                    out.write_all(&self.to_le_bytes())
                }

                fn decode<R: Read + ?Sized>(input: &mut R) -> io::Result<Self> {
                    let mut buf = [0u8; core::mem::size_of::<$t>()];
                    input.read_exact(&mut buf)?;
                    Ok(<$t>::from_le_bytes(buf))
                }
            }
        )*
    };
}

impl_bin_codec!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl BinCodec for () {
    fn encode<W: Write + ?Sized>(&self, _out: &mut W) -> io::Result<()> {
        Ok(())
    }

    fn decode<R: Read + ?Sized>(_input: &mut R) -> io::Result<Self> {
        Ok(())
    }
}

impl BinCodec for bool {
    fn encode<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&[u8::from(*self)])
    }

    fn decode<R: Read + ?Sized>(input: &mut R) -> io::Result<Self> {
        let mut buf = [0u8; 1];
        input.read_exact(&mut buf)?;
        Ok(buf[0] != 0)
    }
}

/// Length-prefixed UTF-8.
impl BinCodec for String {
    fn encode<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        (self.len() as u64).encode(out)?;
        out.write_all(self.as_bytes())
    }

    fn decode<R: Read + ?Sized>(input: &mut R) -> io::Result<Self> {
        let len = u64::decode(input)? as usize;
        let mut buf = vec![0u8; len];
        input.read_exact(&mut buf)?;
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

impl<T: BinCodec, U: BinCodec> BinCodec for (T, U) {
    fn encode<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        self.0.encode(out)?;
        self.1.encode(out)
    }

    fn decode<R: Read + ?Sized>(input: &mut R) -> io::Result<Self> {
        Ok((T::decode(input)?, U::decode(input)?))
    }
}

/// Save `g` in the binary framing, payloads through the given codecs.
pub fn save<N, A, Ty, Ix, W, SN, SA>(
    g: &Graph<N, A, Ty, Ix>,
    out: &mut W,
    store_node: SN,
    store_arc: SA,
) -> io::Result<()>
where
    Ty: EdgeType,
    Ix: IndexType,
    W: Write,
    SN: FnMut(&mut W, &N) -> io::Result<()>,
    SA: FnMut(&mut W, &A) -> io::Result<()>,
{
    save_filtered(g, out, store_node, store_arc, |_| true, |_| true)
}

/// Save the subgraph of `g` induced by the node and arc filters.
///
/// An arc is emitted only if its own filter passes *and* both endpoints
/// were emitted.
pub fn save_filtered<N, A, Ty, Ix, W, SN, SA, NF, AF>(
    g: &Graph<N, A, Ty, Ix>,
    out: &mut W,
    mut store_node: SN,
    mut store_arc: SA,
    mut node_filter: NF,
    mut arc_filter: AF,
) -> io::Result<()>
where
    Ty: EdgeType,
    Ix: IndexType,
    W: Write,
    SN: FnMut(&mut W, &N) -> io::Result<()>,
    SA: FnMut(&mut W, &A) -> io::Result<()>,
    NF: FnMut(&N) -> bool,
    AF: FnMut(&A) -> bool,
{
    // ordinal table: node id -> emission order
    let mut ordinal: Vec<Option<u64>> = vec![None; g.node_count()];
    let mut saved_nodes = Vec::new();
    for n in g.node_ids() {
        if node_filter(&g[n]) {
            ordinal[n.index()] = Some(saved_nodes.len() as u64);
            saved_nodes.push(n);
        }
    }

    debug!("storing {} nodes", saved_nodes.len());
    (saved_nodes.len() as u64).encode(out)?;
    for &n in &saved_nodes {
        store_node(out, &g[n])?;
    }

    let mut saved_arcs = Vec::new();
    for arc in g.arcs() {
        if !arc_filter(arc.info()) {
            continue;
        }
        if let (Some(src), Some(tgt)) = (
            ordinal[arc.source().index()],
            ordinal[arc.target().index()],
        ) {
            saved_arcs.push((src, tgt, arc.id()));
        }
    }

    debug!("storing {} arcs", saved_arcs.len());
    (saved_arcs.len() as u64).encode(out)?;
    for (src, tgt, a) in saved_arcs {
        src.encode(out)?;
        tgt.encode(out)?;
        store_arc(out, &g[a])?;
    }
    Ok(())
}

/// Load a graph from the binary framing, appending its nodes and arcs to
/// `g` and returning the ordinal table of the loaded nodes.
pub fn load<N, A, Ty, Ix, R, LN, LA>(
    g: &mut Graph<N, A, Ty, Ix>,
    input: &mut R,
    mut load_node: LN,
    mut load_arc: LA,
) -> io::Result<Vec<NodeId<Ix>>>
where
    Ty: EdgeType,
    Ix: IndexType,
    R: Read,
    LN: FnMut(&mut R) -> io::Result<N>,
    LA: FnMut(&mut R) -> io::Result<A>,
{
    let num_nodes = u64::decode(input)?;
    debug!("loading {num_nodes} nodes");
    let mut table = Vec::with_capacity(num_nodes as usize);
    for _ in 0..num_nodes {
        let info = load_node(input)?;
        table.push(g.add_node(info));
    }

    let num_arcs = u64::decode(input)?;
    debug!("loading {num_arcs} arcs");
    for _ in 0..num_arcs {
        let src = resolve(&table, u64::decode(input)?)?;
        let tgt = resolve(&table, u64::decode(input)?)?;
        let info = load_arc(input)?;
        g.add_arc(src, tgt, info)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
    }
    Ok(table)
}

fn resolve<Ix: IndexType>(table: &[NodeId<Ix>], ordinal: u64) -> io::Result<NodeId<Ix>> {
    table.get(ordinal as usize).copied().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("arc references node ordinal {ordinal} out of range"),
        )
    })
}

/// Save `g` with the [`BinCodec`] impls of its payloads.
pub fn save_default<N, A, Ty, Ix, W>(g: &Graph<N, A, Ty, Ix>, out: &mut W) -> io::Result<()>
where
    N: BinCodec,
    A: BinCodec,
    Ty: EdgeType,
    Ix: IndexType,
    W: Write,
{
    save(g, out, |w, n| n.encode(w), |w, a| a.encode(w))
}

/// Load into `g` with the [`BinCodec`] impls of its payloads.
pub fn load_default<N, A, Ty, Ix, R>(
    g: &mut Graph<N, A, Ty, Ix>,
    input: &mut R,
) -> io::Result<Vec<NodeId<Ix>>>
where
    N: BinCodec,
    A: BinCodec,
    Ty: EdgeType,
    Ix: IndexType,
    R: Read,
{
    load(g, input, |r| N::decode(r), |r| A::decode(r))
}

// --- text mode ----------------------------------------------------------

/// Whitespace token stream handed to text-mode load codecs.
pub struct Tokens<'a> {
    iter: std::str::SplitAsciiWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    pub fn new(source: &'a str) -> Self {
        Tokens {
            iter: source.split_ascii_whitespace(),
        }
    }

    /// The next raw token.
    pub fn next_token(&mut self) -> io::Result<&'a str> {
        self.iter.next().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "token stream exhausted")
        })
    }

    /// Parse the next token.
    pub fn parse<T>(&mut self) -> io::Result<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let token = self.next_token()?;
        token
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("{e}: {token:?}")))
    }
}

/// Save `g` in the textual framing: both counts first, then one node
/// record per line, then one arc record (`src tgt payload`) per line.
pub fn save_text<N, A, Ty, Ix, W, SN, SA>(
    g: &Graph<N, A, Ty, Ix>,
    out: &mut W,
    mut store_node: SN,
    mut store_arc: SA,
) -> io::Result<()>
where
    Ty: EdgeType,
    Ix: IndexType,
    W: Write,
    SN: FnMut(&mut W, &N) -> io::Result<()>,
    SA: FnMut(&mut W, &A) -> io::Result<()>,
{
    debug!(
        "storing {} nodes and {} arcs in text mode",
        g.node_count(),
        g.arc_count()
    );
    writeln!(out, "{}", g.node_count())?;
    writeln!(out, "{}", g.arc_count())?;
    for n in g.node_ids() {
        store_node(out, &g[n])?;
        writeln!(out)?;
    }
    for arc in g.arcs() {
        write!(out, "{} {} ", arc.source().index(), arc.target().index())?;
        store_arc(out, arc.info())?;
        writeln!(out)?;
    }
    Ok(())
}

/// Load a graph from the textual framing, appending to `g`.
pub fn load_text<N, A, Ty, Ix, R, LN, LA>(
    g: &mut Graph<N, A, Ty, Ix>,
    input: &mut R,
    mut load_node: LN,
    mut load_arc: LA,
) -> io::Result<Vec<NodeId<Ix>>>
where
    Ty: EdgeType,
    Ix: IndexType,
    R: Read,
    LN: FnMut(&mut Tokens<'_>) -> io::Result<N>,
    LA: FnMut(&mut Tokens<'_>) -> io::Result<A>,
{
    let mut source = String::new();
    input.read_to_string(&mut source)?;
    let mut tokens = Tokens::new(&source);

    let num_nodes: u64 = tokens.parse()?;
    let num_arcs: u64 = tokens.parse()?;
    debug!("loading {num_nodes} nodes and {num_arcs} arcs in text mode");

    let mut table = Vec::with_capacity(num_nodes as usize);
    for _ in 0..num_nodes {
        let info = load_node(&mut tokens)?;
        table.push(g.add_node(info));
    }
    for _ in 0..num_arcs {
        let src = resolve(&table, tokens.parse()?)?;
        let tgt = resolve(&table, tokens.parse()?)?;
        let info = load_arc(&mut tokens)?;
        g.add_arc(src, tgt, info)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
    }
    Ok(table)
}
