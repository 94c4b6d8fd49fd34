//! Grouping of journal rows by account code

use crate::types::{AccountGroups, JournalRow};

/// Partition rows by account code, keeping source order.
///
/// The group key is the code's text as written; only the emptiness check
/// trims it. Rows without a code belong to no group.
pub fn group_by_account<I>(rows: I) -> AccountGroups
where
    I: IntoIterator<Item = JournalRow>,
{
    let mut groups = AccountGroups::new();
    let mut skipped = 0usize;

    for (idx, row) in rows.into_iter().enumerate() {
        let code = row.account_code.to_text();
        if code.trim().is_empty() {
            tracing::debug!(record = idx + 1, "row without account code skipped");
            skipped += 1;
            continue;
        }
        groups.push(code, row);
    }

    tracing::info!(
        groups = groups.len(),
        rows = groups.row_count(),
        skipped,
        "journal rows grouped"
    );

    groups
}
