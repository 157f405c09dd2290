use std::collections::HashSet;
use tracing::debug;

use crate::config::DISCORDANCE_UNIQUENESS;
use crate::models::DiscordanceItem;

/// Unclaimed opening sentences of each document.
///
/// Only the first `opening` sentences of a document are considered. This is a
/// proxy for "statement nobody else echoes", not an outlier score.
pub fn select_discordances(
    by_doc: &[Vec<String>],
    claimed: &HashSet<String>,
    opening: usize,
    max_items: usize,
) -> Vec<DiscordanceItem> {
    let mut out: Vec<DiscordanceItem> = by_doc
        .iter()
        .enumerate()
        .flat_map(|(doc, sentences)| {
            sentences
                .iter()
                .take(opening)
                .filter(|s| !claimed.contains(*s))
                .map(move |s| DiscordanceItem {
                    phrase: s.clone(),
                    source_doc: doc,
                    uniqueness: DISCORDANCE_UNIQUENESS,
                })
        })
        .collect();

    let found = out.len();
    out.sort_by(|a, b| b.uniqueness.total_cmp(&a.uniqueness));
    out.truncate(max_items);
    debug!("Discordance selection - candidates={}, kept={}", found, out.len());
    out
}
