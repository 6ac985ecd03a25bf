//! Drag-and-drop payload decoding
//!
//! A drop arrives as one string. Paths containing whitespace are wrapped in
//! `{...}`; other paths are separated by whitespace. Brace nesting is not
//! trusted to be well formed.

use crate::collect::{from_files, from_folder};
use crate::types::*;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Between tokens
    Outside,
    /// Inside a whitespace-delimited token
    Bare,
    /// Inside `{...}`; whitespace belongs to the token
    Braced,
}

/// Split a raw drop payload into path strings.
///
/// Brace characters are never part of a token and empty tokens are never
/// emitted, so unmatched or empty braces degrade gracefully.
pub fn parse_drop_payload(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut state = ScanState::Outside;

    for ch in raw.chars() {
        state = match (state, ch) {
            (ScanState::Braced, '}') => {
                flush(&mut tokens, &mut current);
                ScanState::Outside
            }
            // Nested opening brace: dropped, still braced
            (ScanState::Braced, '{') => ScanState::Braced,
            (ScanState::Braced, c) => {
                current.push(c);
                ScanState::Braced
            }
            (_, '{') => {
                flush(&mut tokens, &mut current);
                ScanState::Braced
            }
            (_, '}') => {
                flush(&mut tokens, &mut current);
                ScanState::Outside
            }
            (_, c) if c.is_whitespace() => {
                flush(&mut tokens, &mut current);
                ScanState::Outside
            }
            (_, c) => {
                current.push(c);
                ScanState::Bare
            }
        };
    }
    flush(&mut tokens, &mut current);

    tokens
}

fn flush(tokens: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        tokens.push(std::mem::take(current));
    }
}

/// Decode a drop payload and build the matching selection.
///
/// The first dropped directory wins and every other item is ignored;
/// otherwise all existing image files are used. Items that do not exist
/// are discarded.
pub fn collect_dropped(raw: &str, recursive: bool) -> Result<SelectionState> {
    let existing: Vec<PathBuf> = parse_drop_payload(raw)
        .into_iter()
        .map(PathBuf::from)
        .filter(|path| {
            let exists = path.exists();
            if !exists {
                log::warn!("Ignoring dropped item that does not exist: {}", path.display());
            }
            exists
        })
        .collect();

    if let Some(folder) = existing.iter().find(|path| path.is_dir()) {
        if existing.len() > 1 {
            log::debug!(
                "Drop contained {} items, using folder {} only",
                existing.len(),
                folder.display()
            );
        }
        return from_folder(folder, recursive);
    }

    from_files(&existing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn braced_and_bare_paths() {
        assert_eq!(
            parse_drop_payload(r"{C:\My Pics\a.png} C:\b.png"),
            vec![r"C:\My Pics\a.png", r"C:\b.png"]
        );
    }

    #[test]
    fn bare_paths_split_on_any_whitespace() {
        assert_eq!(
            parse_drop_payload("/a.png \t /b.jpg\n/c.jpeg  "),
            vec!["/a.png", "/b.jpg", "/c.jpeg"]
        );
    }

    #[test]
    fn adjacent_braced_tokens() {
        assert_eq!(
            parse_drop_payload("{/x y/1.png}{/x y/2.png}"),
            vec!["/x y/1.png", "/x y/2.png"]
        );
    }

    #[test]
    fn braces_end_bare_tokens() {
        assert_eq!(
            parse_drop_payload("/a.png{/b c.png}/d.png"),
            vec!["/a.png", "/b c.png", "/d.png"]
        );
    }

    #[test]
    fn empty_and_unmatched_braces_are_tolerated() {
        assert!(parse_drop_payload("{}").is_empty());
        assert!(parse_drop_payload("{} {}   ").is_empty());
        assert!(parse_drop_payload("").is_empty());
        assert_eq!(parse_drop_payload("{/open ended"), vec!["/open ended"]);
        assert_eq!(parse_drop_payload("/a}/b"), vec!["/a", "/b"]);
        assert_eq!(parse_drop_payload("}}{{/n {x}}"), vec!["/n x"]);
    }

    #[test]
    fn nested_open_brace_keeps_partial_text() {
        // a stray `{` inside braces is dropped; text before it is kept
        assert_eq!(parse_drop_payload("{a {b}"), vec!["a b"]);
        assert_eq!(
            parse_drop_payload("{/x/my {copy}.png} /y.png"),
            vec!["/x/my copy", ".png", "/y.png"]
        );
    }

    #[test]
    fn whitespace_inside_braces_is_kept() {
        assert_eq!(
            parse_drop_payload("{  padded name.png }"),
            vec!["  padded name.png "]
        );
    }
}
