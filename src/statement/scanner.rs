/// One piece of a scanned SQL template.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Segment {
    /// Literal SQL text, copied through verbatim.
    Sql(String),
    /// A `:name` token to resolve against the named bindings.
    Named(String),
    /// A `{}` marker consuming one positional value.
    Marker,
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Split a template into literal text, named tokens, and positional markers
/// in a single left-to-right pass.
///
/// A `:` with zero identifier characters after it is not a token; it stays in
/// the literal text so dialects whose own syntax uses a bare `:` pass through
/// untouched.
pub(crate) fn scan_template(sql: &str) -> Vec<Segment> {
    let bytes = sql.as_bytes();
    let mut segments = Vec::new();
    let mut lit_start = 0;
    let mut idx = 0;

    while idx < bytes.len() {
        match bytes[idx] {
            b':' => {
                let mut end = idx + 1;
                while end < bytes.len() && is_ident_char(bytes[end]) {
                    end += 1;
                }
                if end > idx + 1 {
                    if lit_start < idx {
                        segments.push(Segment::Sql(sql[lit_start..idx].to_string()));
                    }
                    segments.push(Segment::Named(sql[idx + 1..end].to_string()));
                    idx = end;
                    lit_start = idx;
                } else {
                    idx += 1;
                }
            }
            b'{' if bytes.get(idx + 1) == Some(&b'}') => {
                if lit_start < idx {
                    segments.push(Segment::Sql(sql[lit_start..idx].to_string()));
                }
                segments.push(Segment::Marker);
                idx += 2;
                lit_start = idx;
            }
            _ => idx += 1,
        }
    }

    if lit_start < bytes.len() {
        segments.push(Segment::Sql(sql[lit_start..].to_string()));
    }

    segments
}
