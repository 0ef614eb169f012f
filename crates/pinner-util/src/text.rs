//! Line-oriented reading of subprocess output.
//!
//! Output is split on `\n`; a trailing `\r` is dropped and a final line
//! without a terminator is still yielded. Blank lines are skipped.

/// Iterate over the non-empty lines of `output`.
pub fn lines(output: &[u8]) -> impl Iterator<Item = String> + '_ {
    output
        .split(|&b| b == b'\n')
        .map(|raw| {
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            String::from_utf8_lossy(raw).into_owned()
        })
        .filter(|line| !line.trim().is_empty())
}

/// Split `line` at the first `delimiter` into a non-empty key and the rest.
///
/// Returns `None` when the delimiter is missing or the key is empty.
pub fn split_field(line: &str, delimiter: char) -> Option<(&str, &str)> {
    let (key, rest) = line.split_once(delimiter)?;
    if key.is_empty() {
        return None;
    }
    Some((key, rest.trim()))
}
