//! Token stream to region structure.
//!
//! Grammar of the stream produced by the extended face loop collector:
//!
//! ```text
//! stream    := component*
//! component := StartComponent face+ EndComponent
//! face      := StartFace Node* EndFace
//! ```
//!
//! A component with one loop becomes a bare loop; with more it becomes a
//! parity region whose first loop is the outer. Two or more components are
//! wrapped in a single union.

use super::extract::FaceLoopSink;
use super::RegionOpError;
use crate::graph::{FaceLoopToken, NodeId};
use crate::region::{BoundaryType, CurveLoop, ParityRegion, Region, UnionRegion};
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AssemblyError {
    #[error("Expected {expected}, found {found:?}")]
    UnexpectedToken { expected: &'static str, found: FaceLoopToken },

    #[error("Token stream ended inside a {0}")]
    UnexpectedEnd(&'static str),

    #[error("Graph node {0:?} does not name an edge")]
    InvalidNode(NodeId),

    #[error(transparent)]
    Contract(#[from] RegionOpError),
}

impl AssemblyError {
    /// Malformed input is absorbed into an empty result; contract faults are not.
    pub fn is_malformed_input(&self) -> bool {
        !matches!(self, AssemblyError::Contract(_))
    }
}

/// Parse `tokens`, handing each loop's nodes to `sink`. `Ok(None)` when the
/// stream holds no non-empty loop.
pub fn assemble<I, S>(tokens: I, sink: &mut S) -> Result<Option<Region>, AssemblyError>
where
    I: IntoIterator<Item = FaceLoopToken>,
    S: FaceLoopSink + ?Sized,
{
    let mut parser = TokenParser { tokens: tokens.into_iter(), sink };
    parser.stream()
}

struct TokenParser<'s, I, S: ?Sized> {
    tokens: I,
    sink: &'s mut S,
}

impl<I, S> TokenParser<'_, I, S>
where
    I: Iterator<Item = FaceLoopToken>,
    S: FaceLoopSink + ?Sized,
{
    fn stream(&mut self) -> Result<Option<Region>, AssemblyError> {
        let mut components: Vec<Region> = Vec::new();
        while let Some(token) = self.tokens.next() {
            match token {
                FaceLoopToken::StartComponent => {
                    if let Some(component) = self.component()? {
                        components.push(component);
                    }
                }
                found => {
                    return Err(AssemblyError::UnexpectedToken { expected: "start of component", found });
                }
            }
        }

        trace!(components = components.len(), "token stream assembled");
        Ok(match components.len() {
            0 => None,
            1 => components.pop(),
            _ => Some(Region::Union(UnionRegion::new(components))),
        })
    }

    fn component(&mut self) -> Result<Option<Region>, AssemblyError> {
        let mut loops: Vec<CurveLoop> = Vec::new();
        loop {
            match self.tokens.next() {
                Some(FaceLoopToken::StartFace) => {
                    let curve_loop = self.face()?;
                    if !curve_loop.is_empty() {
                        loops.push(curve_loop);
                    }
                }
                Some(FaceLoopToken::EndComponent) => break,
                Some(found) => {
                    return Err(AssemblyError::UnexpectedToken {
                        expected: "start of face or end of component",
                        found,
                    });
                }
                None => return Err(AssemblyError::UnexpectedEnd("component")),
            }
        }

        if loops.len() <= 1 {
            return Ok(loops.pop().map(Region::Loop));
        }
        for hole in loops.iter_mut().skip(1) {
            hole.boundary = BoundaryType::Inner;
        }
        Ok(Some(Region::Parity(ParityRegion::new(loops))))
    }

    fn face(&mut self) -> Result<CurveLoop, AssemblyError> {
        self.sink.begin_loop();
        loop {
            match self.tokens.next() {
                Some(FaceLoopToken::Node(node)) => self.sink.push_node(node)?,
                Some(FaceLoopToken::EndFace) => break,
                Some(found) => {
                    return Err(AssemblyError::UnexpectedToken { expected: "graph node or end of face", found });
                }
                None => return Err(AssemblyError::UnexpectedEnd("face")),
            }
        }
        let primitives = self.sink.finish_loop()?;
        Ok(CurveLoop::new(BoundaryType::Outer, primitives))
    }
}
