use crate::error::CoreError;

/// Limit assumed when an indexer request does not set one.
pub const DEFAULT_INDEXER_LIMIT: u64 = 1;

/// Derive the next indexer cursor from a returned page.
///
/// A page shorter than the requested limit ends the stream. Otherwise the
/// next page starts `returned` events past the prior cursor; a next cursor
/// past `u64::MAX` is [`CoreError::CursorOverflow`].
pub fn next_indexer_cursor(
    returned: usize,
    limit: Option<u64>,
    prior: Option<u64>,
) -> Result<Option<u64>, CoreError> {
    let returned = returned as u64;
    if returned < limit.unwrap_or(DEFAULT_INDEXER_LIMIT) {
        return Ok(None);
    }
    let prior = prior.unwrap_or(0);
    prior
        .checked_add(returned)
        .map(Some)
        .ok_or(CoreError::CursorOverflow { prior, returned })
}
