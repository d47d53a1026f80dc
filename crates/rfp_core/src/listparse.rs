/// Extract the items of a numbered list from free-form model output.
///
/// A retained line starts with an ASCII digit; the whole leading integer plus
/// an optional `.` or `)` delimiter is stripped. Blank lines and lines the
/// model adds around the list (preambles, epilogues) are dropped without
/// reporting. Multi-digit indices parse whole.
pub fn parse_numbered_list(text: &str) -> Vec<String> {
    let mut items = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !line.as_bytes()[0].is_ascii_digit() {
            continue;
        }
        let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
        let rest = rest
            .strip_prefix('.')
            .or_else(|| rest.strip_prefix(')'))
            .unwrap_or(rest);
        let item = rest.trim();
        if !item.is_empty() {
            items.push(item.to_string());
        }
    }
    items
}
