//! Short-id lookup shared by the alarm, reminder and calendar lists.

use uuid::Uuid;

/// Find the single id equal to, or starting with, `input`.
///
/// Returns `None` for blank input, no match, or an ambiguous prefix.
pub(crate) fn resolve_prefix<I>(ids: I, input: &str) -> Option<Uuid>
where
    I: IntoIterator<Item = Uuid>,
{
    let needle = input.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return None;
    }
    let mut hits = ids
        .into_iter()
        .filter(|id| id.to_string().starts_with(&needle));
    match (hits.next(), hits.next()) {
        (Some(id), None) => Some(id),
        _ => None,
    }
}
