//! Narrow-grammar parser for previously generated class files.
//!
//! The accepted shape is exactly what the synthesizer emits:
//!
//! ```text
//! <?php
//! [docblock]            (file header, discarded and regenerated)
//! namespace A\B;
//! use X\Y;*
//! [docblock]            (class doc, kept verbatim)
//! class Name [extends Parent]
//! { method* }
//! ```
//!
//! Method bodies are captured as opaque spans with string- and
//! comment-aware brace matching; their text is never reconstructed.
//! Anything outside this subset fails with a parse error; the engine does
//! not guess at hand-restructured files.

use crate::domain::error::DomainError;
use crate::domain::source::{VerbatimMethod, Visibility};

/// The recoverable structure of an existing generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedClassFile {
    pub namespace: String,
    pub imports: Vec<String>,
    /// Class doc comment, verbatim including the `/** */` markers.
    pub class_doc: Option<String>,
    pub class_name: String,
    pub parent: Option<String>,
    pub methods: Vec<VerbatimMethod>,
}

/// Parse `text` into a [`ParsedClassFile`]. `label` names the file in
/// error messages.
pub fn parse_class_file(text: &str, label: &str) -> Result<ParsedClassFile, DomainError> {
    Parser::new(text, label).parse()
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    label: &'a str,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str, label: &'a str) -> Self {
        Self { src, pos: 0, label }
    }

    fn parse(mut self) -> Result<ParsedClassFile, DomainError> {
        self.skip_bom();
        self.skip_whitespace();
        if !self.eat_literal("<?php") {
            return Err(self.err("file does not start with a PHP open tag"));
        }

        // File-level docblocks are regenerated on write; whatever trivia sits
        // before `namespace` is discarded.
        self.skip_trivia();
        self.expect_word("namespace")?;
        let namespace = self.read_statement("namespace declaration")?;

        let mut imports = Vec::new();
        let mut class_doc = None;
        loop {
            let doc = self.skip_trivia();
            if self.peek_word("use") {
                self.expect_word("use")?;
                imports.push(self.read_statement("use declaration")?);
            } else {
                class_doc = doc;
                break;
            }
        }

        self.expect_word("class")
            .map_err(|_| self.err("expected a class declaration"))?;
        self.skip_trivia();
        let class_name = self.read_identifier("class name")?;

        self.skip_trivia();
        let parent = if self.peek_word("extends") {
            self.expect_word("extends")?;
            self.skip_trivia();
            Some(self.read_qualified_identifier("parent class name")?)
        } else {
            None
        };

        self.skip_trivia();
        if !self.eat_literal("{") {
            return Err(self.err("expected '{' opening the class body"));
        }

        let mut methods = Vec::new();
        loop {
            let doc_start = self.trivia_start();
            if self.eat_literal("}") {
                break;
            }
            if self.pos >= self.src.len() {
                return Err(self.err("class body is not closed"));
            }
            let span_start = self.line_indent_start(doc_start);
            methods.push(self.read_method(span_start)?);
        }

        self.skip_trivia();
        if self.pos < self.src.len() {
            return Err(self.err("unexpected content after the class body"));
        }

        Ok(ParsedClassFile {
            namespace,
            imports,
            class_doc,
            class_name,
            parent,
            methods,
        })
    }

    /// Skip trivia and return the start offset of the docblock directly
    /// preceding the next token, or the token position itself.
    fn trivia_start(&mut self) -> usize {
        match self.skip_trivia_spanned() {
            Some((start, _)) => start,
            None => self.pos,
        }
    }

    /// Walk back from `pos` over spaces and tabs to the first column of the
    /// line, so a verbatim span keeps its leading indentation.
    fn line_indent_start(&self, pos: usize) -> usize {
        let bytes = self.src.as_bytes();
        let mut start = pos;
        while start > 0 && matches!(bytes[start - 1], b' ' | b'\t') {
            start -= 1;
        }
        start
    }

    /// One method: optional docblock (already consumed by the caller via
    /// `doc_start`), visibility keyword, `function`, name, parameter list,
    /// brace-matched body. The whole span is kept verbatim.
    fn read_method(&mut self, span_start: usize) -> Result<VerbatimMethod, DomainError> {
        let word = self.read_identifier("class member")?;
        let (visibility, word) = match Visibility::from_keyword(&word) {
            Some(v) => {
                self.skip_trivia();
                (v, self.read_identifier("member declaration")?)
            }
            None => (Visibility::Public, word),
        };
        if word != "function" {
            return Err(self.err(&format!("unsupported class member '{word}'")));
        }

        self.skip_trivia();
        let name = self.read_identifier("method name")?;

        self.skip_trivia();
        if !self.eat_literal("(") {
            return Err(self.err(&format!("expected parameter list for method '{name}'")));
        }
        self.skip_balanced(b'(', b')')
            .map_err(|_| self.err(&format!("unbalanced parameter list in method '{name}'")))?;

        self.skip_trivia();
        if !self.eat_literal("{") {
            return Err(self.err(&format!("expected a body for method '{name}'")));
        }
        self.skip_balanced(b'{', b'}')
            .map_err(|_| self.err(&format!("unbalanced braces in method '{name}'")))?;

        let text = self.src[span_start..self.pos].trim_end().to_string();
        Ok(VerbatimMethod {
            name,
            visibility,
            text,
        })
    }

    // ── lexical helpers ──────────────────────────────────────────────────

    fn skip_bom(&mut self) {
        if self.src[self.pos..].starts_with('\u{feff}') {
            self.pos += '\u{feff}'.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.src[self.pos..];
        let trimmed = rest.trim_start();
        self.pos += rest.len() - trimmed.len();
    }

    /// Skip whitespace and comments; return the text of the last docblock
    /// seen, if any.
    fn skip_trivia(&mut self) -> Option<String> {
        self.skip_trivia_spanned()
            .map(|(start, end)| self.src[start..end].to_string())
    }

    /// Like [`Self::skip_trivia`] but returns the byte span of the last
    /// docblock.
    fn skip_trivia_spanned(&mut self) -> Option<(usize, usize)> {
        let mut last_doc = None;
        loop {
            self.skip_whitespace();
            let rest = &self.src[self.pos..];
            if rest.starts_with("//") || rest.starts_with('#') {
                match rest.find('\n') {
                    Some(nl) => self.pos += nl + 1,
                    None => self.pos = self.src.len(),
                }
            } else if rest.starts_with("/*") {
                let is_doc = rest.starts_with("/**");
                let start = self.pos;
                match rest[2..].find("*/") {
                    Some(close) => self.pos += 2 + close + 2,
                    None => self.pos = self.src.len(),
                }
                if is_doc {
                    last_doc = Some((start, self.pos));
                }
            } else {
                return last_doc;
            }
        }
    }

    fn peek_word(&self, word: &str) -> bool {
        let rest = &self.src[self.pos..];
        rest.starts_with(word)
            && !rest[word.len()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_alphanumeric() || c == '_')
    }

    fn expect_word(&mut self, word: &str) -> Result<(), DomainError> {
        if self.peek_word(word) {
            self.pos += word.len();
            Ok(())
        } else {
            Err(self.err(&format!("expected keyword '{word}'")))
        }
    }

    fn eat_literal(&mut self, lit: &str) -> bool {
        if self.src[self.pos..].starts_with(lit) {
            self.pos += lit.len();
            true
        } else {
            false
        }
    }

    fn read_identifier(&mut self, what: &str) -> Result<String, DomainError> {
        let rest = &self.src[self.pos..];
        let end = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        if end == 0 {
            return Err(self.err(&format!("expected {what}")));
        }
        self.pos += end;
        Ok(rest[..end].to_string())
    }

    fn read_qualified_identifier(&mut self, what: &str) -> Result<String, DomainError> {
        let rest = &self.src[self.pos..];
        let end = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '\\'))
            .unwrap_or(rest.len());
        if end == 0 {
            return Err(self.err(&format!("expected {what}")));
        }
        self.pos += end;
        Ok(rest[..end].to_string())
    }

    /// Read up to the next `;`, returning the trimmed statement text.
    fn read_statement(&mut self, what: &str) -> Result<String, DomainError> {
        let rest = &self.src[self.pos..];
        let semi = rest
            .find(';')
            .ok_or_else(|| self.err(&format!("unterminated {what}")))?;
        let text = rest[..semi].trim().to_string();
        self.pos += semi + 1;
        if text.is_empty() {
            return Err(self.err(&format!("empty {what}")));
        }
        Ok(text)
    }

    /// Consume text until the `open`/`close` pair that started just before
    /// this call is balanced again. Quotes and comments are tracked so
    /// braces inside strings or comments do not perturb the count.
    fn skip_balanced(&mut self, open: u8, close: u8) -> Result<(), ()> {
        #[derive(PartialEq)]
        enum State {
            Code,
            Single,
            Double,
            LineComment,
            BlockComment,
        }

        let bytes = self.src.as_bytes();
        let mut depth = 1usize;
        let mut state = State::Code;
        let mut i = self.pos;

        while i < bytes.len() {
            let b = bytes[i];
            match state {
                State::Code => match b {
                    b'\'' => state = State::Single,
                    b'"' => state = State::Double,
                    b'/' if bytes.get(i + 1) == Some(&b'/') => state = State::LineComment,
                    b'#' => state = State::LineComment,
                    b'/' if bytes.get(i + 1) == Some(&b'*') => {
                        state = State::BlockComment;
                        i += 1;
                    }
                    _ if b == open => depth += 1,
                    _ if b == close => {
                        depth -= 1;
                        if depth == 0 {
                            self.pos = i + 1;
                            return Ok(());
                        }
                    }
                    _ => {}
                },
                State::Single => match b {
                    b'\\' => i += 1,
                    b'\'' => state = State::Code,
                    _ => {}
                },
                State::Double => match b {
                    b'\\' => i += 1,
                    b'"' => state = State::Code,
                    _ => {}
                },
                State::LineComment => {
                    if b == b'\n' {
                        state = State::Code;
                    }
                }
                State::BlockComment => {
                    if b == b'*' && bytes.get(i + 1) == Some(&b'/') {
                        state = State::Code;
                        i += 1;
                    }
                }
            }
            i += 1;
        }
        Err(())
    }

    fn err(&self, reason: &str) -> DomainError {
        DomainError::parse(self.label, reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERATED: &str = r#"<?php
/**
 * This file was generated by mvcforge.
 *
 * @package Blog
 */

namespace Blog\Controller;

use Zend\Mvc\Controller\AbstractActionController;
use Zend\View\Model\ViewModel;

/**
 * Class IndexController
 *
 * @package Blog
 */
class IndexController extends AbstractActionController
{
    /**
     * Method indexAction
     *
     * @return ViewModel
     */
    public function indexAction()
    {
        return new ViewModel();
    }
}
"#;

    #[test]
    fn parses_generated_controller() {
        let parsed = parse_class_file(GENERATED, "IndexController.php").unwrap();
        assert_eq!(parsed.namespace, "Blog\\Controller");
        assert_eq!(parsed.imports.len(), 2);
        assert_eq!(parsed.class_name, "IndexController");
        assert_eq!(parsed.parent.as_deref(), Some("AbstractActionController"));
        assert_eq!(parsed.methods.len(), 1);
        assert_eq!(parsed.methods[0].name, "indexAction");
        assert_eq!(parsed.methods[0].visibility, Visibility::Public);
    }

    #[test]
    fn method_span_includes_its_docblock() {
        let parsed = parse_class_file(GENERATED, "IndexController.php").unwrap();
        let text = &parsed.methods[0].text;
        assert!(text.starts_with("    /**"));
        assert!(text.contains("Method indexAction"));
        assert!(text.ends_with('}'));
    }

    #[test]
    fn class_doc_is_captured_verbatim() {
        let parsed = parse_class_file(GENERATED, "IndexController.php").unwrap();
        let doc = parsed.class_doc.unwrap();
        assert!(doc.starts_with("/**"));
        assert!(doc.contains("Class IndexController"));
    }

    #[test]
    fn parses_docless_file() {
        let text = "<?php\n\nnamespace Blog;\n\nclass Module\n{\n    public function getConfig()\n    {\n        return array();\n    }\n}\n";
        let parsed = parse_class_file(text, "Module.php").unwrap();
        assert_eq!(parsed.class_doc, None);
        assert_eq!(parsed.methods[0].name, "getConfig");
        assert!(!parsed.methods[0].text.contains("/**"));
    }

    #[test]
    fn braces_inside_strings_do_not_break_matching() {
        let text = "<?php\nnamespace A;\nclass B\n{\n    public function f()\n    {\n        $x = \"}{\"; // } stray\n        return $x;\n    }\n}\n";
        let parsed = parse_class_file(text, "B.php").unwrap();
        assert_eq!(parsed.methods.len(), 1);
        assert!(parsed.methods[0].text.contains("stray"));
    }

    #[test]
    fn hand_edited_bodies_survive_with_nested_blocks() {
        let text = "<?php\nnamespace A;\nclass B\n{\n    public function f()\n    {\n        if (true) {\n            foreach ([] as $v) {\n            }\n        }\n        return 1;\n    }\n\n    public function g()\n    {\n        return 2;\n    }\n}\n";
        let parsed = parse_class_file(text, "B.php").unwrap();
        assert_eq!(parsed.methods.len(), 2);
        assert_eq!(parsed.methods[1].name, "g");
    }

    #[test]
    fn missing_php_tag_is_parse_error() {
        let err = parse_class_file("class B {}", "B.php").unwrap_err();
        assert!(matches!(err, DomainError::Parse { .. }));
    }

    #[test]
    fn file_without_class_is_parse_error() {
        let err = parse_class_file("<?php\nnamespace A;\nreturn array();\n", "x.php").unwrap_err();
        assert!(matches!(err, DomainError::Parse { .. }));
    }

    #[test]
    fn unsupported_member_is_parse_error() {
        let text = "<?php\nnamespace A;\nclass B\n{\n    const X = 1;\n}\n";
        let err = parse_class_file(text, "B.php").unwrap_err();
        assert!(matches!(err, DomainError::Parse { .. }));
    }

    #[test]
    fn trailing_garbage_is_parse_error() {
        let text = "<?php\nnamespace A;\nclass B\n{\n}\nclass C\n{\n}\n";
        assert!(parse_class_file(text, "B.php").is_err());
    }
}
