//! Matching existing run configurations against derived descriptors

use super::CommandDescriptor;

/// A stored invocation that can tell whether it was produced from a
/// descriptor. User-supplied extras layered on top must not affect the answer.
pub trait AcceptsDescriptor {
    fn is_from(&self, descriptor: &CommandDescriptor) -> bool;
}

/// Whether `existing` already runs what `candidate` describes
pub fn is_equivalent<C>(existing: &C, candidate: &CommandDescriptor) -> bool
where
    C: AcceptsDescriptor + ?Sized,
{
    existing.is_from(candidate)
}
