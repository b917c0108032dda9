/// Playlists whose lowercase name contains the lowercase query, in original order,
/// paired with their index in the unfiltered list. An empty query keeps everything.
pub fn filter_playlists<'a>(playlists: &'a [String], query: &str) -> Vec<(usize, &'a str)> {
    let needle = query.to_lowercase();
    playlists
        .iter()
        .enumerate()
        .filter(|(_, name)| needle.is_empty() || name.to_lowercase().contains(&needle))
        .map(|(i, name)| (i, name.as_str()))
        .collect()
}

/// Clamps a selection into `[0, len - 1]`, or 0 for an empty list.
pub fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}
