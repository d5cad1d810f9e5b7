use std::{collections::BTreeMap, iter::Peekable, str::CharIndices};

use crate::{
    ast::{Biblio, Entry},
    Error,
};

use super::Format;

/// A type wrapper around [`String`] to represent a `BibTex` format string.
///
/// Parsing is total: any input produces a (possibly empty) [`Biblio`] and text
/// that is not part of a `@kind{cite, ...}` record is skipped. Composing
/// normalizes every field value to the braced form, so whether a value was
/// originally quoted or bare is not preserved across a round trip. The field
/// text itself is.
#[derive(Debug)]
pub struct BibTex(String);

impl Format for BibTex {
    fn new(val: String) -> Self {
        Self(val)
    }

    fn parse(self) -> Result<Biblio, Error> {
        let entries = scan_entries(&self.0)
            .into_iter()
            .map(|record| Entry {
                cite: record.cite.to_owned(),
                kind: record.kind.to_owned(),
                fields: decode_fields(record.body),
            })
            .collect();

        Ok(Biblio::new(entries))
    }

    fn compose(biblio: &Biblio) -> Self {
        let raw = biblio
            .entries()
            .map(|entry| format!("{}\n", Self::compose_entry(entry)))
            .collect();

        Self(raw)
    }

    fn compose_entry(entry: &Entry) -> String {
        format!(
            "@{}{{{},\n{}}}\n",
            entry.kind,
            entry.cite,
            compose_fields(&entry.fields)
        )
    }

    fn raw(self) -> String {
        self.0
    }

    fn name() -> &'static str {
        "BibTex"
    }

    fn ext() -> &'static str {
        "bib"
    }
}

type Chars<'a> = Peekable<CharIndices<'a>>;

/// A raw `(kind, cite, body)` triple split out of the document text.
struct RawRecord<'a> {
    kind: &'a str,
    cite: &'a str,
    body: &'a str,
}

/// Splits raw document text into records with a forward pass.
///
/// Malformed openings are skipped silently and scanning resumes at the next
/// `@`. A record whose closing brace is missing at the end of input is kept
/// with the partial body accumulated so far rather than dropped, and when a
/// later record opening sits inside that partial text the truncated record
/// ends there so the records after it are not lost with it.
fn scan_entries(src: &str) -> Vec<RawRecord<'_>> {
    let mut records = Vec::new();
    let mut cursor = src;

    while let Some(at) = cursor.find('@') {
        cursor = &cursor[at + 1..];
        let mut chars = cursor.char_indices().peekable();

        let kind = match ident(cursor, &mut chars) {
            Some(kind) => kind,
            // an '@' with no type name is noise, not a record
            None => continue,
        };

        skip_whitespace(&mut chars);

        // only brace-delimited records are recognized, anything else means
        // the '@' run was not an opening
        if !matches!(chars.peek(), Some(&(_, '{'))) {
            continue;
        }
        chars.next();

        let (cite, has_body, cite_resume) = scan_cite(cursor, &mut chars);
        let (body, resume) = if has_body {
            scan_body(cursor, &mut chars)
        } else {
            ("", cite_resume)
        };

        records.push(RawRecord { kind, cite, body });

        cursor = match resume {
            Some(offset) => &cursor[offset..],
            None => chars.peek().map_or("", |&(i, _)| &cursor[i..]),
        };
    }

    records
}

/// Maximal run of alphanumeric/underscore characters at the current position.
fn ident<'a>(src: &'a str, chars: &mut Chars<'a>) -> Option<&'a str> {
    let start = chars.peek().map_or(src.len(), |&(i, _)| i);
    let mut end = start;
    while let Some(&(i, c)) = chars.peek() {
        if c.is_alphanumeric() || c == '_' {
            end = i + c.len_utf8();
            chars.next();
        } else {
            break;
        }
    }

    if end > start {
        Some(&src[start..end])
    } else {
        None
    }
}

fn skip_whitespace(chars: &mut Chars<'_>) {
    while matches!(chars.peek(), Some(&(_, c)) if c.is_whitespace()) {
        chars.next();
    }
}

/// Reads the citation key up to the first `,` or `}` at the top nesting level.
///
/// Returns the trimmed key, whether a body follows (only when the key was
/// terminated by a comma) and, for a key cut short by the end of input, the
/// offset of a later record opening found inside it to resume scanning from.
fn scan_cite<'a>(src: &'a str, chars: &mut Chars<'a>) -> (&'a str, bool, Option<usize>) {
    let start = chars.peek().map_or(src.len(), |&(i, _)| i);
    let mut depth = 1_usize;
    for (i, c) in chars.by_ref() {
        match c {
            ',' if depth == 1 => return (src[start..i].trim(), true, None),
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return (src[start..i].trim(), false, None);
                }
            }
            _ => {}
        }
    }

    // end of input in the middle of the citation key
    let partial = &src[start..];
    match next_opening(partial) {
        Some(off) => (partial[..off].trim(), false, Some(start + off)),
        None => (partial.trim(), false, None),
    }
}

/// Reads the record body up to the brace matching the record's opening one.
///
/// Depth starts at 1 and the terminating brace is excluded from the body.
/// Counting nesting is mandatory here, field values routinely contain inner
/// `{}` groups and stopping at the first `}` truncates them.
///
/// A body unterminated at the end of input is returned as-is, unless a later
/// record opening sits inside it: the terminator went missing, not the rest
/// of the document, so the body stops at the opening and its offset is
/// returned to resume scanning from.
fn scan_body<'a>(src: &'a str, chars: &mut Chars<'a>) -> (&'a str, Option<usize>) {
    let start = chars.peek().map_or(src.len(), |&(i, _)| i);
    let mut depth = 1_usize;
    for (i, c) in chars.by_ref() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return (&src[start..i], None);
                }
            }
            _ => {}
        }
    }

    // unterminated record, keep what was accumulated instead of dropping it
    let partial = &src[start..];
    match next_opening(partial) {
        Some(off) => (&partial[..off], Some(start + off)),
        None => (partial, None),
    }
}

/// Position of the first `@kind{` record opening within the text, if any.
fn next_opening(text: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(found) = text[from..].find('@') {
        let at = from + found;
        let rest = &text[at + 1..];
        let mut chars = rest.char_indices().peekable();

        if ident(rest, &mut chars).is_some() {
            skip_whitespace(&mut chars);
            if matches!(chars.peek(), Some(&(_, '{'))) {
                return Some(at);
            }
        }

        from = at + 1;
    }

    None
}

/// Decodes a record body into field assignments.
///
/// Single pass state machine: accumulate a field name until `=`, then
/// dispatch on the first non-whitespace character into braced, quoted or
/// bare value handling. Ill-formed fragments are dropped or committed
/// best-effort, never surfaced as an error.
fn decode_fields(body: &str) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    let mut chars = body.char_indices().peekable();

    while let Some(name) = seek_name(body, &mut chars) {
        skip_whitespace(&mut chars);

        let value = match chars.peek() {
            None => String::new(),
            Some(&(_, '{')) => {
                chars.next();
                braced_value(body, &mut chars)
            }
            Some(&(_, '"')) => {
                chars.next();
                quoted_value(body, &mut chars)
            }
            Some(_) => bare_value(body, &mut chars),
        };

        // a '=' with nothing to its left has no field to assign to, the value
        // scan above still advanced past the fragment
        if !name.is_empty() {
            fields.insert(name, value);
        }
    }

    fields
}

/// Accumulates a field name until `=`, lowercased and trimmed.
///
/// Stray commas reset the pending name and a name left dangling at the end of
/// the body without a `=` is dropped.
fn seek_name(body: &str, chars: &mut Chars<'_>) -> Option<String> {
    let mut start = None;
    for (i, c) in chars.by_ref() {
        match c {
            '=' => {
                let start = start.unwrap_or(i);
                return Some(body[start..i].trim().to_lowercase());
            }
            ',' => start = None,
            _ => {
                if start.is_none() {
                    start = Some(i);
                }
            }
        }
    }

    None
}

/// Value between balanced braces, inner brace pairs preserved verbatim.
fn braced_value(body: &str, chars: &mut Chars<'_>) -> String {
    let start = chars.peek().map_or(body.len(), |&(i, _)| i);
    let mut depth = 1_usize;
    for (i, c) in chars.by_ref() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return body[start..i].to_owned();
                }
            }
            _ => {}
        }
    }

    // value never closed, commit what was accumulated
    body[start..].to_owned()
}

/// Value up to an unescaped `"`, the escapes themselves are kept verbatim.
fn quoted_value(body: &str, chars: &mut Chars<'_>) -> String {
    let start = chars.peek().map_or(body.len(), |&(i, _)| i);
    let mut escaped = false;
    for (i, c) in chars.by_ref() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            return body[start..i].to_owned();
        }
    }

    body[start..].to_owned()
}

/// Unquoted literal value, runs to the next `,`, `}` or end of line.
fn bare_value(body: &str, chars: &mut Chars<'_>) -> String {
    let start = chars.peek().map_or(body.len(), |&(i, _)| i);
    let mut end = start;
    while let Some(&(i, c)) = chars.peek() {
        if matches!(c, ',' | '}' | '\n' | '\r') {
            break;
        }
        end = i + c.len_utf8();
        chars.next();
    }

    body[start..end].trim().to_owned()
}

fn compose_fields(fields: &BTreeMap<String, String>) -> String {
    fields
        .iter()
        .map(|(name, value)| format!("  {name} = {{{value}}},\n"))
        .collect()
}
