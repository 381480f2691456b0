//! Parser for `return array(...);` config documents.
//!
//! This is deliberately narrow: it reads the subset of PHP that config
//! files in scaffolded applications actually use. Both `array(...)` and
//! `[...]` syntaxes are accepted; scalar expressions it cannot type
//! (concatenations, constants, `__DIR__`) are captured verbatim as
//! [`PhpValue::Raw`] so a re-exported document keeps them intact.

use super::{PhpEntry, PhpKey, PhpValue};
use crate::domain::error::DomainError;

/// Parse a full config file into its returned value.
pub fn parse_config_document(text: &str, label: &str) -> Result<PhpValue, DomainError> {
    let mut parser = Parser {
        src: text.as_bytes(),
        pos: 0,
        label,
    };
    parser.skip_bom();
    parser.expect_literal("<?php")?;
    parser.skip_trivia();
    parser.expect_word("return")?;
    parser.skip_trivia();
    let value = parser.parse_value()?;
    parser.skip_trivia();
    parser.expect_literal(";")?;
    parser.skip_trivia();
    // A closing `?>` tag is tolerated, anything else is not.
    if parser.eat_literal("?>") {
        parser.skip_trivia();
    }
    if parser.pos < parser.src.len() {
        return Err(parser.error("unexpected content after return statement"));
    }
    Ok(value)
}

struct Parser<'a> {
    src: &'a [u8],
    pos: usize,
    label: &'a str,
}

impl<'a> Parser<'a> {
    fn error(&self, reason: impl Into<String>) -> DomainError {
        DomainError::parse(self.label, reason)
    }

    fn skip_bom(&mut self) {
        if self.src.starts_with(&[0xEF, 0xBB, 0xBF]) {
            self.pos = 3;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn starts_with(&self, lit: &str) -> bool {
        self.src[self.pos..].starts_with(lit.as_bytes())
    }

    fn eat_literal(&mut self, lit: &str) -> bool {
        if self.starts_with(lit) {
            self.pos += lit.len();
            true
        } else {
            false
        }
    }

    fn expect_literal(&mut self, lit: &str) -> Result<(), DomainError> {
        if self.eat_literal(lit) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{lit}'")))
        }
    }

    fn expect_word(&mut self, word: &str) -> Result<(), DomainError> {
        if self.starts_with(word) {
            let after = self.src.get(self.pos + word.len());
            let boundary = match after {
                Some(b) => !b.is_ascii_alphanumeric() && *b != b'_',
                None => true,
            };
            if boundary {
                self.pos += word.len();
                return Ok(());
            }
        }
        Err(self.error(format!("expected '{word}'")))
    }

    /// Skip whitespace and `//`, `#`, `/* */` comments.
    fn skip_trivia(&mut self) {
        loop {
            while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
                self.pos += 1;
            }
            if self.starts_with("//") || self.starts_with("#") {
                while self.peek().is_some_and(|b| b != b'\n') {
                    self.pos += 1;
                }
            } else if self.starts_with("/*") {
                self.pos += 2;
                while self.pos < self.src.len() && !self.starts_with("*/") {
                    self.pos += 1;
                }
                self.pos = (self.pos + 2).min(self.src.len());
            } else {
                return;
            }
        }
    }

    fn parse_value(&mut self) -> Result<PhpValue, DomainError> {
        self.skip_trivia();
        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some(b'[') => {
                self.pos += 1;
                self.parse_entries(b']')
            }
            _ if self.starts_with("array") => {
                let mark = self.pos;
                if self.expect_word("array").is_ok() {
                    self.skip_trivia();
                    if self.eat_literal("(") {
                        return self.parse_entries(b')');
                    }
                }
                // An identifier that merely starts with "array".
                self.pos = mark;
                self.parse_raw()
            }
            Some(b'\'') | Some(b'"') => self.parse_string_or_raw(),
            _ => self.parse_scalar_or_raw(),
        }
    }

    fn parse_entries(&mut self, close: u8) -> Result<PhpValue, DomainError> {
        let mut entries = Vec::new();
        loop {
            self.skip_trivia();
            if self.peek() == Some(close) {
                self.pos += 1;
                return Ok(PhpValue::Array(entries));
            }
            let value = self.parse_value()?;
            self.skip_trivia();
            if self.eat_literal("=>") {
                let key = match value {
                    PhpValue::String(s) => PhpKey::Str(s),
                    PhpValue::Int(i) => PhpKey::Int(i),
                    _ => return Err(self.error("unsupported array key")),
                };
                let value = self.parse_value()?;
                entries.push(PhpEntry {
                    key: Some(key),
                    value,
                });
                self.skip_trivia();
            } else {
                entries.push(PhpEntry { key: None, value });
            }
            if self.eat_literal(",") {
                continue;
            }
            self.skip_trivia();
            if self.peek() == Some(close) {
                self.pos += 1;
                return Ok(PhpValue::Array(entries));
            }
            return Err(self.error("expected ',' or closing delimiter in array"));
        }
    }

    /// A quoted string that stands alone becomes [`PhpValue::String`];
    /// one followed by an operator (concatenation) folds into a raw span.
    fn parse_string_or_raw(&mut self) -> Result<PhpValue, DomainError> {
        let start = self.pos;
        let raw = self.read_quoted()?;
        let mark = self.pos;
        self.skip_trivia();
        if self.peek() == Some(b'.') && !self.starts_with("..") {
            self.pos = start;
            return self.parse_raw();
        }
        self.pos = mark;
        Ok(PhpValue::String(raw))
    }

    /// Decode a single- or double-quoted string. Double quotes are treated
    /// like single quotes; interpolation is out of scope for config files.
    fn read_quoted(&mut self) -> Result<String, DomainError> {
        let quote = self.peek().ok_or_else(|| self.error("expected string"))?;
        self.pos += 1;
        let mut out = String::new();
        loop {
            match self.peek() {
                None => return Err(self.error("unterminated string")),
                Some(b'\\') => {
                    self.pos += 1;
                    match self.peek() {
                        Some(b'\\') => out.push('\\'),
                        Some(b) if b == quote => out.push(b as char),
                        Some(b) => {
                            out.push('\\');
                            out.push(b as char);
                        }
                        None => return Err(self.error("unterminated string")),
                    }
                    self.pos += 1;
                }
                Some(b) if b == quote => {
                    self.pos += 1;
                    return Ok(out);
                }
                Some(_) => {
                    // Strings are valid UTF-8 by construction of the input.
                    let rest = std::str::from_utf8(&self.src[self.pos..])
                        .map_err(|_| self.error("config file is not valid UTF-8"))?;
                    let ch = rest.chars().next().unwrap_or('\u{FFFD}');
                    out.push(ch);
                    self.pos += ch.len_utf8();
                }
            }
        }
    }

    fn parse_scalar_or_raw(&mut self) -> Result<PhpValue, DomainError> {
        let start = self.pos;
        for (word, value) in [
            ("true", PhpValue::Bool(true)),
            ("false", PhpValue::Bool(false)),
            ("null", PhpValue::Null),
        ] {
            if self.expect_word(word).is_ok() {
                if self.at_value_end() {
                    return Ok(value);
                }
                self.pos = start;
                break;
            }
        }

        if self.peek().is_some_and(|b| b.is_ascii_digit() || b == b'-') {
            let mut end = self.pos + 1;
            let mut float = false;
            while let Some(&b) = self.src.get(end) {
                if b.is_ascii_digit() {
                    end += 1;
                } else if b == b'.' && !float {
                    float = true;
                    end += 1;
                } else {
                    break;
                }
            }
            let text = std::str::from_utf8(&self.src[self.pos..end])
                .map_err(|_| self.error("config file is not valid UTF-8"))?;
            self.pos = end;
            if self.at_value_end() {
                if float {
                    if let Ok(f) = text.parse::<f64>() {
                        return Ok(PhpValue::Float(f));
                    }
                } else if let Ok(i) = text.parse::<i64>() {
                    return Ok(PhpValue::Int(i));
                }
            }
            self.pos = start;
        }

        self.parse_raw()
    }

    /// After a candidate scalar, only a separator or terminator may follow.
    fn at_value_end(&self) -> bool {
        let mut lookahead = Parser {
            src: self.src,
            pos: self.pos,
            label: self.label,
        };
        lookahead.skip_trivia();
        matches!(
            lookahead.peek(),
            None | Some(b',') | Some(b')') | Some(b']') | Some(b';')
        ) || lookahead.starts_with("=>")
    }

    /// Consume an expression verbatim up to a `,`, `;`, or closing
    /// delimiter at depth zero, respecting strings and nested parens.
    fn parse_raw(&mut self) -> Result<PhpValue, DomainError> {
        let start = self.pos;
        let mut depth = 0usize;
        loop {
            match self.peek() {
                None => return Err(self.error("unterminated expression")),
                Some(b'\'') | Some(b'"') => {
                    self.read_quoted()?;
                }
                Some(b'(') | Some(b'[') => {
                    depth += 1;
                    self.pos += 1;
                }
                Some(b')') | Some(b']') if depth > 0 => {
                    depth -= 1;
                    self.pos += 1;
                }
                Some(b',') | Some(b';') | Some(b')') | Some(b']') if depth == 0 => {
                    let text = std::str::from_utf8(&self.src[start..self.pos])
                        .map_err(|_| self.error("config file is not valid UTF-8"))?;
                    let text = text.trim();
                    if text.is_empty() {
                        return Err(self.error("empty expression"));
                    }
                    return Ok(PhpValue::Raw(text.to_string()));
                }
                Some(_) => self.pos += 1,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::add_module_entry;

    const APPLICATION_CONFIG: &str = "<?php\n\
        return array(\n\
            'modules' => array(\n\
                'Application',\n\
            ),\n\
            'module_listener_options' => array(\n\
                'config_glob_paths' => array(\n\
                    'config/autoload/{,*.}{global,local}.php',\n\
                ),\n\
                'module_paths' => array(\n\
                    './module',\n\
                    './vendor',\n\
                ),\n\
            ),\n\
        );\n";

    #[test]
    fn parses_skeleton_application_config() {
        let doc = parse_config_document(APPLICATION_CONFIG, "application.config.php").unwrap();
        assert!(doc.get("modules").unwrap().contains_string("Application"));
        let paths = doc
            .get("module_listener_options")
            .unwrap()
            .get("module_paths")
            .unwrap();
        assert!(paths.contains_string("./module"));
        assert!(paths.contains_string("./vendor"));
    }

    #[test]
    fn round_trips_through_mutation() {
        let mut doc = parse_config_document(APPLICATION_CONFIG, "application.config.php").unwrap();
        assert!(add_module_entry(&mut doc, "Blog").unwrap());
        let exported = format!("return {};", doc.export(0));

        let reparsed =
            parse_config_document(&format!("<?php\n{exported}\n"), "application.config.php")
                .unwrap();
        assert!(reparsed.get("modules").unwrap().contains_string("Blog"));
        assert!(
            reparsed
                .get("module_listener_options")
                .unwrap()
                .get("config_glob_paths")
                .unwrap()
                .contains_string("config/autoload/{,*.}{global,local}.php")
        );
    }

    #[test]
    fn accepts_short_array_syntax() {
        let doc = parse_config_document(
            "<?php\nreturn [\n    'modules' => ['Application'],\n];\n",
            "application.config.php",
        )
        .unwrap();
        assert!(doc.get("modules").unwrap().contains_string("Application"));
    }

    #[test]
    fn accepts_comments_and_trailing_close_tag() {
        let doc = parse_config_document(
            "<?php\n// generated\nreturn array(\n    /* inline */ 'a' => 1,\n);\n?>\n",
            "config.php",
        )
        .unwrap();
        assert_eq!(doc.get("a"), Some(&PhpValue::Int(1)));
    }

    #[test]
    fn raw_expressions_survive_reexport() {
        let doc = parse_config_document(
            "<?php\nreturn array(\n    'blog' => __DIR__ . '/../view',\n);\n",
            "module.config.php",
        )
        .unwrap();
        assert_eq!(
            doc.get("blog"),
            Some(&PhpValue::Raw("__DIR__ . '/../view'".into()))
        );
        assert!(doc.export(0).contains("'blog' => __DIR__ . '/../view'"));
    }

    #[test]
    fn concatenated_string_is_raw() {
        let doc = parse_config_document(
            "<?php\nreturn array('a' => 'x' . 'y');\n",
            "config.php",
        )
        .unwrap();
        assert_eq!(doc.get("a"), Some(&PhpValue::Raw("'x' . 'y'".into())));
    }

    #[test]
    fn scalar_types_are_recognised() {
        let doc = parse_config_document(
            "<?php\nreturn array('i' => 3, 'f' => 1.5, 'b' => true, 'n' => null, 'neg' => -2);\n",
            "config.php",
        )
        .unwrap();
        assert_eq!(doc.get("i"), Some(&PhpValue::Int(3)));
        assert_eq!(doc.get("f"), Some(&PhpValue::Float(1.5)));
        assert_eq!(doc.get("b"), Some(&PhpValue::Bool(true)));
        assert_eq!(doc.get("n"), Some(&PhpValue::Null));
        assert_eq!(doc.get("neg"), Some(&PhpValue::Int(-2)));
    }

    #[test]
    fn missing_php_tag_is_an_error() {
        assert!(parse_config_document("return array();", "config.php").is_err());
    }

    #[test]
    fn missing_return_is_an_error() {
        assert!(parse_config_document("<?php\n$x = array();", "config.php").is_err());
    }

    #[test]
    fn trailing_content_is_an_error() {
        assert!(
            parse_config_document("<?php\nreturn array();\necho 'hi';\n", "config.php").is_err()
        );
    }

    #[test]
    fn unterminated_array_is_an_error() {
        assert!(parse_config_document("<?php\nreturn array(\n    'a',\n", "config.php").is_err());
    }
}
