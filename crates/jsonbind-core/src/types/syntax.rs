//! Parser for the textual type syntax `Name<Arg, Arg<Nested>>`.

/// A parsed type term before names are classified.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Term {
    pub name: String,
    pub args: Vec<Term>,
}

pub(crate) fn parse(text: &str) -> Result<Term, String> {
    let mut parser = Parser { text, pos: 0 };
    let term = parser.term()?;
    parser.skip_whitespace();
    if parser.pos != text.len() {
        return Err(format!(
            "unexpected trailing input at offset {} in type: {}",
            parser.pos, text
        ));
    }
    Ok(term)
}

struct Parser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn term(&mut self) -> Result<Term, String> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == '<' || c == '>' || c == ',' || c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
        if start == self.pos {
            return Err(format!("expected type name at offset {} in type: {}", start, self.text));
        }
        let name = self.text[start..self.pos].to_string();

        self.skip_whitespace();
        let mut args = Vec::new();
        if self.peek() == Some('<') {
            self.pos += 1;
            loop {
                args.push(self.term()?);
                self.skip_whitespace();
                match self.peek() {
                    Some(',') => self.pos += 1,
                    Some('>') => {
                        self.pos += 1;
                        break;
                    }
                    _ => {
                        return Err(format!(
                            "expected ',' or '>' at offset {} in type: {}",
                            self.pos, self.text
                        ));
                    }
                }
            }
        }
        Ok(Term { name, args })
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested() {
        let term = parse("Map<String, List<i32>>").unwrap();
        assert_eq!(term.name, "Map");
        assert_eq!(term.args.len(), 2);
        assert_eq!(term.args[1].name, "List");
        assert_eq!(term.args[1].args[0].name, "i32");
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse("").is_err());
        assert!(parse("List<").is_err());
        assert!(parse("List<i32").is_err());
        assert!(parse("List<i32>>").is_err());
    }
}
