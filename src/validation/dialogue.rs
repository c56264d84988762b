//! Dialogue structure checker
//!
//! An indentation-driven state machine over a scene block's content lines.
//! Only conditional dialogue items are checked: each must carry a
//! `conditions:` sub-list containing at least one `if` and one `says` field.

use crate::parser::block::Block;
use crate::validation::engine::ValidationResult;

/// State for the dialogue item currently being scanned.
///
/// Threaded explicitly through the walk; finalization happens when a new
/// item starts, the list dedents, or the content ends.
#[derive(Debug, Default)]
struct ItemState {
    conditional: bool,
    conditions_seen: bool,
    conditions_indent: usize,
    has_if: bool,
    has_says: bool,
}

impl ItemState {
    fn finalize(&self, line: usize, result: &mut ValidationResult) {
        if !self.conditional {
            return;
        }
        if !self.conditions_seen {
            result.add_error(line, "conditional dialogue missing conditions.".to_string());
        } else if !(self.has_if && self.has_says) {
            result.add_error(line, "conditional dialogue missing if/says.".to_string());
        }
    }
}

/// Check the structure of a scene block's dialogue list, if it has one.
pub fn check_dialogue(block: &Block, result: &mut ValidationResult) {
    // The dialogue key's indentation establishes the list baseline.
    let mut dialogue_indent = None;
    let mut start_idx = 0;
    for (idx, raw) in block.content.iter().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        if raw.trim() == "dialogue:" {
            dialogue_indent = Some(indent_of(raw));
            start_idx = idx + 1;
            break;
        }
    }
    let Some(dialogue_indent) = dialogue_indent else {
        return;
    };

    let mut item_indent: Option<usize> = None;
    let mut item = ItemState::default();

    for raw in &block.content[start_idx..] {
        if raw.trim().is_empty() {
            continue;
        }
        let indent = indent_of(raw);
        let stripped = raw.trim();

        // Dedenting to the baseline terminates the list.
        if indent <= dialogue_indent {
            item.finalize(block.start_line, result);
            return;
        }

        if let Some(after_dash) = stripped.strip_prefix("- ") {
            // A dash at the stable item indentation starts a new item; a
            // deeper dash is content of the current item (a conditions
            // entry, say) and falls through below.
            if item_indent.is_none() || item_indent == Some(indent) {
                item.finalize(block.start_line, result);
                item_indent = Some(indent);
                item = ItemState::default();
                if let Some(value) = after_dash.trim().strip_prefix("type:") {
                    if value.trim() == "conditional" {
                        item.conditional = true;
                    }
                }
                continue;
            }
        } else if item_indent.is_none() {
            continue;
        } else if let Some(value) = stripped.strip_prefix("type:") {
            if value.trim() == "conditional" {
                item.conditional = true;
            }
            continue;
        }

        if item.conditional {
            if stripped == "conditions:" {
                item.conditions_seen = true;
                item.conditions_indent = indent;
                continue;
            }
            if item.conditions_seen && indent > item.conditions_indent {
                let entry = stripped.strip_prefix("- ").unwrap_or(stripped);
                if entry.starts_with("if:") {
                    item.has_if = true;
                }
                if entry.starts_with("says:") {
                    item.has_says = true;
                }
            }
        }
    }

    item.finalize(block.start_line, result);
}

/// Leading spaces only; tabs inside dialogue content are treated as text.
fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::extract_blocks;

    fn check(content: &str) -> Vec<String> {
        let (blocks, diags) = extract_blocks(content);
        assert!(diags.is_empty(), "unexpected extraction diagnostics");
        let mut result = ValidationResult::new();
        check_dialogue(&blocks[0], &mut result);
        result.diagnostics.into_iter().map(|d| d.message).collect()
    }

    #[test]
    fn test_no_dialogue_key() {
        let errors = check(
            "```hopscotch:scene id=scene.intro\ntitle: Intro\nsummary: Opening\n```\n",
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_plain_items_unchecked() {
        let errors = check(
            "\
```hopscotch:scene id=scene.intro
title: Intro
dialogue:
  - speaker: innkeeper
    says: Welcome in.
  - speaker: party
```
",
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_conditional_missing_conditions() {
        let errors = check(
            "\
```hopscotch:scene id=scene.intro
title: Intro
dialogue:
  - type: conditional
    speaker: innkeeper
```
",
        );
        assert_eq!(errors, vec!["conditional dialogue missing conditions."]);
    }

    #[test]
    fn test_conditional_missing_says() {
        let errors = check(
            "\
```hopscotch:scene id=scene.intro
title: Intro
dialogue:
  - type: conditional
    conditions:
      if: partyHasKey
```
",
        );
        assert_eq!(errors, vec!["conditional dialogue missing if/says."]);
    }

    #[test]
    fn test_conditional_missing_if() {
        let errors = check(
            "\
```hopscotch:scene id=scene.intro
title: Intro
dialogue:
  - type: conditional
    conditions:
      says: You found it.
```
",
        );
        assert_eq!(errors, vec!["conditional dialogue missing if/says."]);
    }

    #[test]
    fn test_conditional_complete() {
        let errors = check(
            "\
```hopscotch:scene id=scene.intro
title: Intro
dialogue:
  - type: conditional
    conditions:
      if: partyHasKey
      says: You found it.
```
",
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_dash_marked_condition_entries() {
        let errors = check(
            "\
```hopscotch:scene id=scene.intro
title: Intro
dialogue:
  - type: conditional
    conditions:
      - if: partyHasKey
        says: You found it.
```
",
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_type_key_on_followup_line() {
        let errors = check(
            "\
```hopscotch:scene id=scene.intro
title: Intro
dialogue:
  - speaker: innkeeper
    type: conditional
```
",
        );
        assert_eq!(errors, vec!["conditional dialogue missing conditions."]);
    }

    #[test]
    fn test_second_item_finalizes_first() {
        let errors = check(
            "\
```hopscotch:scene id=scene.intro
title: Intro
dialogue:
  - type: conditional
  - type: conditional
    conditions:
      if: heardRumor
      says: So it is true.
```
",
        );
        assert_eq!(errors, vec!["conditional dialogue missing conditions."]);
    }

    #[test]
    fn test_dedent_terminates_list() {
        let errors = check(
            "\
```hopscotch:scene id=scene.intro
title: Intro
dialogue:
  - type: conditional
    conditions:
      if: partyHasKey
      says: You found it.
outcomes: party enters
```
",
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_dedent_finalizes_incomplete_item() {
        let errors = check(
            "\
```hopscotch:scene id=scene.intro
title: Intro
dialogue:
  - type: conditional
outcomes: party enters
```
",
        );
        assert_eq!(errors, vec!["conditional dialogue missing conditions."]);
    }

    #[test]
    fn test_condition_keys_outside_sublist_ignored() {
        // `if`/`says` at item level do not satisfy the conditions sub-list.
        let errors = check(
            "\
```hopscotch:scene id=scene.intro
title: Intro
dialogue:
  - type: conditional
    conditions:
    if: partyHasKey
    says: You found it.
```
",
        );
        assert_eq!(errors, vec!["conditional dialogue missing if/says."]);
    }
}
