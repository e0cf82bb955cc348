//! Template identifiers and the resolver strategy that assigns them.

/// Opaque key selecting which layout template renders a record.
///
/// Produced by a [`TemplateResolver`], consumed by a
/// [`SlotFactory`](crate::SlotFactory). The engine never interprets the value
/// beyond equality and hashing, so applications can use layout ids, enum
/// discriminants, or anything else, as long as resolver and factory agree on
/// the same id space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId(pub u64);

/// Decides which template renders the record at a position.
///
/// Must be a pure function of its inputs. The engine calls it once per
/// container creation and once per re-render pass per visible position, and
/// caches nothing in between, so a resolver that mutates state will observe
/// an unspecified call pattern.
pub trait TemplateResolver<D> {
    fn resolve(&self, position: usize, record: &D) -> TemplateId;
}

/// Any `Fn(usize, &D) -> TemplateId` closure is a resolver, so a
/// single-layout list can pass `|_, _| TemplateId(1)` without a named type.
impl<D, F> TemplateResolver<D> for F
where
    F: Fn(usize, &D) -> TemplateId,
{
    fn resolve(&self, position: usize, record: &D) -> TemplateId {
        self(position, record)
    }
}
