use crate::types::{NormalizedEntry, ResultItem, Verdict};
use crate::utils::url::canonical_link;
use std::collections::HashSet;
use tracing::{debug, info};

/// Keep accepted entries whose canonical link has not been seen yet.
///
/// Input order is query dispatch order, so the first query to return a story
/// owns it.
pub fn deduplicate<I>(classified: I) -> Vec<ResultItem>
where
    I: IntoIterator<Item = (NormalizedEntry, Verdict)>,
{
    let mut seen_links = HashSet::new();
    let mut unique_items = Vec::new();
    let mut duplicates = 0usize;

    for (entry, verdict) in classified {
        if verdict == Verdict::Reject {
            continue;
        }

        let canonical = canonical_link(&entry.link);
        if !seen_links.insert(canonical.clone()) {
            debug!("Removing duplicate entry: {} ({})", entry.title, entry.link);
            duplicates += 1;
            continue;
        }

        unique_items.push(entry.into_result_item(canonical));
    }

    if duplicates > 0 {
        info!("Removed {} duplicate entries", duplicates);
    }

    unique_items
}

/// Most recent first. Ties keep their dedup order.
pub fn rank(items: &mut [ResultItem]) {
    items.sort_by(|a, b| b.sortable_date.cmp(&a.sortable_date));
}

pub fn deduplicate_and_rank<I>(classified: I) -> Vec<ResultItem>
where
    I: IntoIterator<Item = (NormalizedEntry, Verdict)>,
{
    let mut items = deduplicate(classified);
    rank(&mut items);
    items
}
