//! Block scanner
//!
//! Single pass over the document lines: finds fenced `hopscotch` blocks,
//! parses their info strings, and captures shallow top-level fields.

use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

use regex::Regex;

use crate::parser::block::{Block, BlockKind};
use crate::validation::{Diagnostic, Severity};

/// Opening fence for a typed block; the remainder of the line is the info string.
const BLOCK_FENCE: &str = "```hopscotch:";
/// Any line starting with this closes the current block.
const CLOSING_FENCE: &str = "```";

fn id_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bid=(\S+)").expect("id token pattern"))
}

/// Extract all fenced blocks from a document.
///
/// Extraction diagnostics (missing type, missing id, unterminated block) are
/// returned alongside the blocks; an unterminated block halts the scan and
/// the in-progress block is discarded.
pub fn extract_blocks(content: &str) -> (Vec<Block>, Vec<Diagnostic>) {
    let lines: Vec<&str> = content.lines().collect();
    let mut blocks = Vec::new();
    let mut diagnostics = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if let Some(rest) = line.strip_prefix(BLOCK_FENCE) {
            let start_line = i + 1;
            let info = rest.trim();
            let Some(type_token) = info.split_whitespace().next() else {
                diagnostics.push(Diagnostic {
                    line: start_line,
                    message: "Missing type in hopscotch block info string.".to_string(),
                    severity: Severity::Error,
                });
                i += 1;
                continue;
            };
            let kind = BlockKind::parse(type_token);

            let id = match id_token_re().captures(info) {
                Some(caps) => caps[1].to_string(),
                None => {
                    diagnostics.push(Diagnostic {
                        line: start_line,
                        message: "Missing id in hopscotch block info string.".to_string(),
                        severity: Severity::Error,
                    });
                    String::new()
                }
            };

            i += 1;
            let content_start = i;
            while i < lines.len() && !lines[i].starts_with(CLOSING_FENCE) {
                i += 1;
            }
            if i >= lines.len() {
                diagnostics.push(Diagnostic {
                    line: lines.len() + 1,
                    message: format!("Unterminated hopscotch block for id {}.", id),
                    severity: Severity::Error,
                });
                break;
            }

            let content_lines: Vec<String> =
                lines[content_start..i].iter().map(|l| l.to_string()).collect();
            let (keys, values) = shallow_fields(&content_lines);
            blocks.push(Block {
                kind,
                id,
                keys,
                values,
                content: content_lines,
                start_line,
            });
        }
        i += 1;
    }

    (blocks, diagnostics)
}

/// Capture zero-indentation `key: value` pairs.
///
/// Blank lines, indented lines, and lines without a colon are invisible to
/// the shallow capture. Duplicate keys: last value wins, key set unaffected.
fn shallow_fields(lines: &[String]) -> (BTreeSet<String>, HashMap<String, String>) {
    let mut keys = BTreeSet::new();
    let mut values = HashMap::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        if line.starts_with(' ') || line.starts_with('\t') {
            continue;
        }
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        keys.insert(key.to_string());
        values.insert(key.to_string(), strip_quotes(rest.trim()).to_string());
    }
    (keys, values)
}

/// Strip one matching pair of surrounding quote characters.
pub(crate) fn strip_quotes(value: &str) -> &str {
    if value.len() >= 2 {
        let bytes = value.as_bytes();
        let (first, last) = (bytes[0], bytes[value.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}
