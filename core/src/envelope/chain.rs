//! Walking wrapped-error chains.
//!
//! A chain is followed one layer at a time through [`CausedBy`]. Ordinary
//! errors expose their next layer through [`std::error::Error::source`]. An
//! [`ErrorEnvelope`] hands out its cause as a [`SharedError`] instead, because
//! the cause lives behind the envelope's lock and may be replaced. Shared
//! `Arc` layers are looked through so the error they hold is visited too.

use std::error::Error as StdError;
use std::sync::Arc;

use super::message::SharedError;
use super::ErrorEnvelope;

/// Layers visited before a walk gives up; guards against cause cycles
pub const MAX_DEPTH: usize = 128;

/// The next layer of a chain
pub enum Layer<'a> {
    Borrowed(&'a (dyn StdError + 'static)),
    Shared(SharedError),
}

impl Layer<'_> {
    pub fn as_error(&self) -> &(dyn StdError + 'static) {
        match self {
            Layer::Borrowed(err) => *err,
            Layer::Shared(err) => &**err,
        }
    }
}

/// Capability to unwrap one layer of an error chain
pub trait CausedBy {
    fn caused_by(&self) -> Option<Layer<'_>>;
}

impl CausedBy for dyn StdError + 'static {
    fn caused_by(&self) -> Option<Layer<'_>> {
        if let Some(envelope) = self.downcast_ref::<ErrorEnvelope>() {
            return envelope.cause().map(Layer::Shared);
        }
        if let Some(shared) = self.downcast_ref::<SharedError>() {
            return Some(Layer::Borrowed(&**shared));
        }
        // `Arc<T>` and `Box<T>` forward `source` to `T`, which skips the envelope
        if let Some(envelope) = self.downcast_ref::<Arc<ErrorEnvelope>>() {
            return Some(Layer::Borrowed(&**envelope));
        }
        if let Some(envelope) = self.downcast_ref::<Box<ErrorEnvelope>>() {
            return Some(Layer::Borrowed(&**envelope));
        }
        self.source().map(Layer::Borrowed)
    }
}

/// Visit `err` and its causes outside-in, returning the first `Some` from `f`
pub fn find_map<T, F>(err: &(dyn StdError + 'static), mut f: F) -> Option<T>
where
    F: FnMut(&(dyn StdError + 'static)) -> Option<T>,
{
    step(err, &mut f, &mut Vec::new(), 0)
}

fn step<T>(
    err: &(dyn StdError + 'static),
    f: &mut dyn FnMut(&(dyn StdError + 'static)) -> Option<T>,
    seen: &mut Vec<ErrorEnvelope>,
    depth: usize,
) -> Option<T> {
    if let Some(envelope) = err.downcast_ref::<ErrorEnvelope>() {
        if seen.iter().any(|visited| visited.ptr_eq(envelope)) {
            tracing::debug!(depth, "error chain revisits an envelope, stopping walk");
            return None;
        }
        seen.push(envelope.clone());
    }
    if let Some(found) = f(err) {
        return Some(found);
    }
    if depth + 1 >= MAX_DEPTH {
        tracing::warn!(depth, "error chain too deep, stopping walk");
        return None;
    }
    let next = err.caused_by()?;
    step(next.as_error(), f, seen, depth + 1)
}

/// Whether any layer of the chain satisfies `predicate`
pub fn any<F>(err: &(dyn StdError + 'static), mut predicate: F) -> bool
where
    F: FnMut(&(dyn StdError + 'static)) -> bool,
{
    find_map(err, |layer| predicate(layer).then_some(())).is_some()
}

/// First envelope in the chain, outside-in
pub fn find_envelope(err: &(dyn StdError + 'static)) -> Option<ErrorEnvelope> {
    find_map(err, |layer| layer.downcast_ref::<ErrorEnvelope>().cloned())
}

/// Message of every layer, outermost first.
///
/// Shared `Arc` layers and consecutive repeats are skipped, so an envelope
/// that only forwards its cause's message shows up once.
pub fn messages(err: &(dyn StdError + 'static)) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    find_map(err, |layer| {
        if !layer.is::<SharedError>() {
            let line = layer.to_string();
            if lines.last() != Some(&line) {
                lines.push(line);
            }
        }
        None::<()>
    });
    lines
}
