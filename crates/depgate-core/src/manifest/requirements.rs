//! Line-oriented `requirements.txt` dialect.
//!
//! One dependency per line. Rules, applied to each line in order:
//!
//! 1. Trailing `\r` and surrounding whitespace are dropped.
//! 2. Blank lines and lines starting with `#` are skipped.
//! 3. An inline comment (`#` preceded by whitespace) is cut off, and so is
//!    an environment marker (everything from the first `;`).
//! 4. The earliest version operator splits name from version:
//!    - `==` is an exact pin: the version is the text after the *last* `==`.
//!    - Any other operator (`===`, `~=`, `>=`, `<=`, `!=`, `>`, `<`) keeps the
//!      whole specifier, operator included, as the version string.
//!    - No operator: the version is [`UNPINNED_VERSION`].
//! 5. Later duplicates overwrite earlier ones.

use crate::errors::Result;
use crate::manifest::decode_utf8;
use crate::model::{DependencyMap, Dialect, UNPINNED_VERSION};

/// Exact pin separator
const PIN_SEPARATOR: &str = "==";

/// Start of a PEP 508 environment marker
const MARKER_SEPARATOR: char = ';';

/// Recognized operators, longest first so that ties at one position
/// resolve to the longest match.
const OPERATORS: &[&str] = &["===", "~=", ">=", "<=", "!=", "==", ">", "<"];

/// Parse `requirements.txt` bytes into a canonical map.
///
/// # Errors
///
/// Returns `InvalidEncoding` if the bytes are not UTF-8.
pub fn parse_requirements(bytes: &[u8]) -> Result<DependencyMap> {
    let text = decode_utf8(Dialect::Requirements, bytes)?;
    let mut deps = DependencyMap::new();

    for (index, raw_line) in text.split('\n').enumerate() {
        let line = raw_line.trim_end_matches('\r').trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = strip_inline_comment(line);
        match split_requirement(line) {
            Some((name, version)) => {
                deps.insert(name, version);
            }
            None => {
                tracing::debug!(line_no = index + 1, line, "skipping requirement without a name");
            }
        }
    }

    Ok(deps)
}

/// Split one requirement line into `(name, version)`.
///
/// Returns `None` when the name part is empty. Environment markers are
/// dropped before the operator scan so their comparisons never split a name.
pub fn split_requirement(line: &str) -> Option<(String, String)> {
    let line = strip_marker(line);
    let (name, version) = match earliest_operator(line) {
        None => (line, UNPINNED_VERSION.to_string()),
        Some((pos, PIN_SEPARATOR)) => {
            let version = line.rsplit(PIN_SEPARATOR).next().unwrap_or_default();
            (&line[..pos], version.trim().to_string())
        }
        Some((pos, _)) => (&line[..pos], line[pos..].trim().to_string()),
    };

    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), version))
}

/// Position and text of the first operator in `line`.
fn earliest_operator(line: &str) -> Option<(usize, &'static str)> {
    let mut best: Option<(usize, &'static str)> = None;
    for op in OPERATORS {
        if let Some(pos) = line.find(op) {
            // OPERATORS is longest-first, so only a strictly earlier hit wins
            if best.map_or(true, |(best_pos, _)| pos < best_pos) {
                best = Some((pos, op));
            }
        }
    }
    best
}

fn strip_marker(line: &str) -> &str {
    match line.find(MARKER_SEPARATOR) {
        Some(pos) => line[..pos].trim_end(),
        None => line,
    }
}

fn strip_inline_comment(line: &str) -> &str {
    let mut prev_is_space = false;
    for (idx, ch) in line.char_indices() {
        if ch == '#' && prev_is_space {
            return line[..idx].trim_end();
        }
        prev_is_space = ch.is_whitespace();
    }
    line
}
