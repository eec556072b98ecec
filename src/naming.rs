//! Artifact filenames and source ordering.
//!
//! Strips are content-addressed: the filename is the lowercase hex MD5 of
//! the batch's source filenames concatenated in order, plus `.jpg`. The
//! same name is reused for the strip's thumbnail.
//!
//! Anything that serves an artifact by name goes through
//! [`validate_artifact_name`] first. Only `^[0-9a-f]{32}\.jpg$` passes, so a
//! name can never climb out of the store directory.

use crate::imaging::JPEG_EXTENSION;
use md5::{Digest, Md5};
use std::cmp::Ordering;
use thiserror::Error;

const DIGEST_HEX_LEN: usize = 32;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid artifact name: {0:?}")]
pub struct InvalidNameError(pub String);

/// Strip filename for an ordered batch of source filenames.
///
/// Order matters: the same files in a different order name a different
/// strip.
pub fn strip_filename<S: AsRef<str>>(sources: &[S]) -> String {
    let mut hasher = Md5::new();
    for source in sources {
        hasher.update(source.as_ref().as_bytes());
    }
    format!("{:x}.{}", hasher.finalize(), JPEG_EXTENSION)
}

/// Accept only names of the form `<32 lowercase hex>.jpg`.
pub fn validate_artifact_name(name: &str) -> Result<&str, InvalidNameError> {
    let valid = name
        .strip_suffix(JPEG_EXTENSION)
        .and_then(|rest| rest.strip_suffix('.'))
        .is_some_and(|digest| {
            digest.len() == DIGEST_HEX_LEN
                && digest
                    .bytes()
                    .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        });
    if valid {
        Ok(name)
    } else {
        Err(InvalidNameError(name.to_string()))
    }
}

/// Natural ordering: runs of digits compare by numeric value, everything
/// else by character.
///
/// `img2.jpg` sorts before `img10.jpg`. Names that compare equal this way
/// (e.g. `img01` and `img1`) fall back to plain string order so the sort is
/// total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_run = take_digits(&mut left);
                let r_run = take_digits(&mut right);
                let ord = compare_digit_runs(&l_run, &r_run);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                if l != r {
                    return l.cmp(&r);
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        chars.next();
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
