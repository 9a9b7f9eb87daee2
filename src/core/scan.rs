//! Label extraction for human-readable tool output.

/// Scan `text` line by line for each label.
///
/// A line matches a label when it contains the label substring; the value is everything
/// after the first colon on that line, trimmed. Later matches overwrite earlier ones.
/// Labels that never match come back as `None`. A matching line without a colon is ignored.
pub fn scan_labels<const N: usize>(text: &str, labels: [&str; N]) -> [Option<String>; N] {
    let mut found: [Option<String>; N] = std::array::from_fn(|_| None);
    for line in text.lines() {
        for (label, slot) in labels.iter().zip(found.iter_mut()) {
            if !line.contains(label) {
                continue;
            }
            if let Some((_, value)) = line.split_once(':') {
                *slot = Some(value.trim().to_string());
            }
        }
    }
    found
}
