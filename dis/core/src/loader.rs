use thiserror::Error;

use crate::decode::is_command;

/// Errors from turning program text into command bytes. Offsets are byte
/// positions into the source.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    #[error("character {found:?} at byte {offset} is not a command")]
    UnexpectedCharacter { found: char, offset: usize },
    #[error("comment opened at byte {offset} is never closed")]
    UnterminatedComment { offset: usize },
}

/// Strip whitespace and comments, keeping only command bytes.
///
/// Comments run from `(` to `)`, do not nest, and may span lines. Any other
/// non-command character is rejected with its position. The result is an
/// initial memory image prefix; the machine zero-fills the remainder.
pub fn parse_source(text: &str) -> Result<Vec<u8>, LoadError> {
    let mut program = Vec::new();
    let mut comment_start = None;
    for (offset, ch) in text.char_indices() {
        if comment_start.is_some() {
            if ch == ')' {
                comment_start = None;
            }
            continue;
        }
        if ch == '(' {
            comment_start = Some(offset);
        } else if ch.is_ascii_whitespace() {
            continue;
        } else if ch.is_ascii() && is_command(ch as u8) {
            program.push(ch as u8);
        } else {
            return Err(LoadError::UnexpectedCharacter { found: ch, offset });
        }
    }
    if let Some(offset) = comment_start {
        return Err(LoadError::UnterminatedComment { offset });
    }
    Ok(program)
}
