//! JSONL serialization for persisted items: one JSON object per line.

use crate::error::CoreError;
use crate::types::Item;

/// Parse JSONL content into items paired with their 1-based line numbers,
/// skipping blank lines.
pub(super) fn parse_jsonl_items(content: &str) -> Result<Vec<(usize, Item)>, CoreError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_num, line)| {
            serde_json::from_str::<Item>(line.trim())
                .map(|item| (line_num + 1, item))
                .map_err(|e| CoreError::ItemParse {
                    line: line_num + 1,
                    message: e.to_string(),
                })
        })
        .collect()
}

/// Export items to JSONL in iteration order.
pub(super) fn export_items_to_jsonl<'a>(
    items: impl IntoIterator<Item = &'a Item>,
) -> Result<String, CoreError> {
    items.into_iter().try_fold(String::new(), |mut out, item| {
        out.push_str(&serde_json::to_string(item)?);
        out.push('\n');
        Ok(out)
    })
}
