//! Line-level CSV field splitting.

/// Splits one CSV line into raw fields, handling quoted values.
///
/// A field may be wrapped in double quotes, in which case embedded commas
/// are literal and a doubled quote (`""`) decodes to one quote character.
/// Quoting state never carries past the end of the line, so a dangling
/// open quote simply runs to the line end. Fields are not trimmed here;
/// callers trim at extraction time.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes => {
                in_quotes = true;
            }
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => {
                current.push(c);
            }
        }
    }

    fields.push(current);
    fields
}
