use crate::movements::Movement;

/// Net quantity contributed by `movements`, regardless of their order.
///
/// Callers pass every movement strictly before the range start. The result is
/// not clamped: a negative value means the history is inconsistent.
pub fn resolve_opening_balance<'a, I>(movements: I) -> i64
where
    I: IntoIterator<Item = &'a Movement>,
{
    movements.into_iter().map(Movement::signed_delta).sum()
}
