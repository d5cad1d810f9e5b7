//! LaTeX cleanup for display strings.
//!
//! Field values in a BibTeX file often carry LaTeX accent commands and
//! case-protection braces that should not appear in a user interface. This
//! module maps the common accent commands to their Unicode characters, drops
//! leftover commands, and strips the braces.
//!
//! Everything here is a pure function over the input text. The parser keeps
//! field values verbatim, cleaning is strictly a presentation concern.

/// Literal accent command replacements, braced variants listed before their
/// short forms so `\'{a}` is not half-replaced by `\'a`.
const ACCENTS: &[(&str, &str)] = &[
    // umlaut (diaeresis)
    ("\\\"{a}", "ä"),
    ("\\\"{A}", "Ä"),
    ("\\\"{e}", "ë"),
    ("\\\"{E}", "Ë"),
    ("\\\"{i}", "ï"),
    ("\\\"{I}", "Ï"),
    ("\\\"{o}", "ö"),
    ("\\\"{O}", "Ö"),
    ("\\\"{u}", "ü"),
    ("\\\"{U}", "Ü"),
    ("\\\"a", "ä"),
    ("\\\"A", "Ä"),
    ("\\\"e", "ë"),
    ("\\\"E", "Ë"),
    ("\\\"i", "ï"),
    ("\\\"I", "Ï"),
    ("\\\"o", "ö"),
    ("\\\"O", "Ö"),
    ("\\\"u", "ü"),
    ("\\\"U", "Ü"),
    // acute
    ("\\'{\\i}", "í"),
    ("\\'{a}", "á"),
    ("\\'{A}", "Á"),
    ("\\'{e}", "é"),
    ("\\'{E}", "É"),
    ("\\'{i}", "í"),
    ("\\'{I}", "Í"),
    ("\\'{o}", "ó"),
    ("\\'{O}", "Ó"),
    ("\\'{u}", "ú"),
    ("\\'{U}", "Ú"),
    ("\\'a", "á"),
    ("\\'A", "Á"),
    ("\\'e", "é"),
    ("\\'E", "É"),
    ("\\'i", "í"),
    ("\\'I", "Í"),
    ("\\'o", "ó"),
    ("\\'O", "Ó"),
    ("\\'u", "ú"),
    ("\\'U", "Ú"),
    ("\\'y", "ý"),
    ("\\'Y", "Ý"),
    // grave
    ("\\`{a}", "à"),
    ("\\`{A}", "À"),
    ("\\`{e}", "è"),
    ("\\`{E}", "È"),
    ("\\`{o}", "ò"),
    ("\\`{O}", "Ò"),
    ("\\`{u}", "ù"),
    ("\\`{U}", "Ù"),
    ("\\`a", "à"),
    ("\\`A", "À"),
    ("\\`e", "è"),
    ("\\`E", "È"),
    ("\\`i", "ì"),
    ("\\`I", "Ì"),
    ("\\`o", "ò"),
    ("\\`O", "Ò"),
    ("\\`u", "ù"),
    ("\\`U", "Ù"),
    // circumflex
    ("\\^{a}", "â"),
    ("\\^{A}", "Â"),
    ("\\^{e}", "ê"),
    ("\\^{E}", "Ê"),
    ("\\^{o}", "ô"),
    ("\\^{O}", "Ô"),
    ("\\^{u}", "û"),
    ("\\^{U}", "Û"),
    ("\\^a", "â"),
    ("\\^A", "Â"),
    ("\\^e", "ê"),
    ("\\^E", "Ê"),
    ("\\^i", "î"),
    ("\\^I", "Î"),
    ("\\^o", "ô"),
    ("\\^O", "Ô"),
    ("\\^u", "û"),
    ("\\^U", "Û"),
    // tilde
    ("\\~{a}", "ã"),
    ("\\~{A}", "Ã"),
    ("\\~{n}", "ñ"),
    ("\\~{N}", "Ñ"),
    ("\\~{o}", "õ"),
    ("\\~{O}", "Õ"),
    ("\\~a", "ã"),
    ("\\~A", "Ã"),
    ("\\~n", "ñ"),
    ("\\~N", "Ñ"),
    ("\\~o", "õ"),
    ("\\~O", "Õ"),
    // cedilla
    ("\\c{c}", "ç"),
    ("\\c{C}", "Ç"),
    ("\\c c", "ç"),
    ("\\c C", "Ç"),
    // ring
    ("\\r{a}", "å"),
    ("\\r{A}", "Å"),
    ("\\r a", "å"),
    ("\\r A", "Å"),
    // letters and ligatures
    ("\\ss", "ß"),
    ("\\ae", "æ"),
    ("\\AE", "Æ"),
    ("\\oe", "œ"),
    ("\\OE", "Œ"),
    ("\\o", "ø"),
    ("\\O", "Ø"),
    ("\\l", "ł"),
    ("\\L", "Ł"),
    ("\\i", "ı"),
];

/// Decodes LaTeX accent commands to Unicode and strips the remaining markup.
///
/// Unknown commands such as `\textit` are removed and the case-protection
/// braces around words are dropped. The result is only suitable for display,
/// decoding is lossy and never fed back into an [`Entry`][crate::ast::Entry].
#[must_use]
pub fn decode(input: &str) -> String {
    let mut result = input.to_owned();

    for (pattern, replacement) in ACCENTS {
        if result.contains(pattern) {
            result = result.replace(pattern, replacement);
        }
    }

    clean_braces(&strip_commands(&result))
}

/// Removes all `{` and `}` characters from the text.
///
/// BibTeX uses braces for case protection, for display they are noise.
#[must_use]
pub fn clean_braces(input: &str) -> String {
    input.chars().filter(|c| !matches!(c, '{' | '}')).collect()
}

/// Drops remaining `\command` sequences, keeping the text around them.
fn strip_commands(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }

        match chars.peek() {
            // a command name, consume the alphabetic run
            Some(n) if n.is_ascii_alphabetic() => {
                while matches!(chars.peek(), Some(n) if n.is_ascii_alphabetic()) {
                    chars.next();
                }
            }
            // an escaped single character stands for itself
            Some(&n) => {
                result.push(n);
                chars.next();
            }
            None => {}
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accents_map_to_unicode() {
        assert_eq!("Müller", decode("M\\\"{u}ller"));
        assert_eq!("Gödel", decode("G\\\"odel"));
        assert_eq!("café", decode("caf\\'e"));
        assert_eq!("Señor", decode("Se\\~nor"));
    }

    #[test]
    fn braced_forms_are_replaced_before_short_forms() {
        // a half-replaced "\'{a}" would leave stray braces behind
        assert_eq!("á", decode("\\'{a}"));
    }

    #[test]
    fn case_protection_braces_are_stripped() {
        assert_eq!(
            "The C Programming Language",
            decode("The {C} Programming Language")
        );
        assert_eq!("HTTP", clean_braces("{HTTP}"));
    }

    #[test]
    fn unknown_commands_are_dropped() {
        assert_eq!("emphasis", decode("\\textit{emphasis}"));
        assert_eq!("a & b", decode("a \\& b"));
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!("Nothing to do", decode("Nothing to do"));
    }
}
