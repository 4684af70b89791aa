//! The generated PHP file
//!
//! Rendering produces a `return array(...)` literal in the compact style
//! below; parsing accepts that style plus the other shapes a PHP array literal
//! can take (short `[]` syntax, double-quoted strings, integer keys, comments),
//! so a hand-touched or older map can still be read back.
//!
//! ```php
//! <?php
//! // i18n-map.php @generated by i18n-map
//! return array(
//!   'domain' => 'jetpack',
//!   'type' => 'plugins',
//!   'packages' => array(
//!     'jetpack-assets' => '2.1.0.0',
//!   ),
//! );
//! ```

use crate::errors::ManifestError;
use crate::types::{Manifest, ManifestType};
use indexmap::IndexMap;

pub const GENERATED_MARKER: &str = "// i18n-map.php @generated by i18n-map";

const INDENT: &str = "  ";

/// Render a manifest as the contents of the generated PHP file
pub fn render(manifest: &Manifest) -> String {
    let mut code = String::from("<?php\n");
    code.push_str(GENERATED_MARKER);
    code.push('\n');
    code.push_str("return array(\n");
    push_entry(&mut code, 1, "domain", &manifest.domain);
    push_entry(&mut code, 1, "type", manifest.manifest_type.as_str());
    code.push_str(INDENT);
    code.push_str("'packages' => array(\n");
    for (textdomain, version) in &manifest.packages {
        push_entry(&mut code, 2, textdomain, version);
    }
    code.push_str(INDENT);
    code.push_str("),\n");
    code.push_str(");\n");
    code
}

fn push_entry(code: &mut String, depth: usize, key: &str, value: &str) {
    for _ in 0..depth {
        code.push_str(INDENT);
    }
    code.push_str(&quote(key));
    code.push_str(" => ");
    code.push_str(&quote(value));
    code.push_str(",\n");
}

/// Single-quote a string the way PHP's var_export does
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if c == '\\' || c == '\'' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

/// Parse the contents of a generated PHP file back into a manifest
pub fn parse(content: &str) -> Result<Manifest, ManifestError> {
    let mut parser = Parser::new(content);
    parser.skip_open_tag();
    parser.expect_keyword("return")?;
    let value = parser.parse_value()?;
    parser.expect_char(';')?;
    parser.skip_trivia();
    if !parser.at_end() {
        return Err(parser.error("unexpected content after return statement"));
    }

    let line = parser.line;
    let PhpValue::Array(entries) = value else {
        return Err(ManifestError::MapParse {
            line,
            message: "expected an array literal".to_string(),
        });
    };
    manifest_from_entries(entries, line)
}

fn manifest_from_entries(
    entries: IndexMap<String, PhpValue>,
    line: usize,
) -> Result<Manifest, ManifestError> {
    let missing = |key: &str| ManifestError::MapParse {
        line,
        message: format!("missing or non-string '{}' entry", key),
    };

    let domain = entries
        .get("domain")
        .and_then(PhpValue::as_str)
        .ok_or_else(|| missing("domain"))?
        .to_string();
    let manifest_type: ManifestType = entries
        .get("type")
        .and_then(PhpValue::as_str)
        .ok_or_else(|| missing("type"))?
        .parse()?;

    let mut packages = IndexMap::new();
    match entries.get("packages") {
        Some(PhpValue::Array(items)) => {
            for (textdomain, version) in items {
                let version = version.as_str().ok_or_else(|| ManifestError::MapParse {
                    line,
                    message: format!("version for '{}' is not a string", textdomain),
                })?;
                packages.insert(textdomain.clone(), version.to_string());
            }
        }
        Some(PhpValue::Str(_)) | None => return Err(missing("packages")),
    }

    Ok(Manifest {
        domain,
        manifest_type,
        packages,
    })
}

#[derive(Debug, Clone, PartialEq)]
enum PhpValue {
    Str(String),
    Array(IndexMap<String, PhpValue>),
}

impl PhpValue {
    fn as_str(&self) -> Option<&str> {
        match self {
            PhpValue::Str(s) => Some(s),
            PhpValue::Array(_) => None,
        }
    }
}

struct Parser<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> Parser<'a> {
    fn new(content: &'a str) -> Self {
        Parser {
            chars: content.chars().peekable(),
            line: 1,
        }
    }

    fn error(&self, message: &str) -> ManifestError {
        ManifestError::MapParse {
            line: self.line,
            message: message.to_string(),
        }
    }

    fn at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn skip_open_tag(&mut self) {
        self.skip_trivia();
        let tag: String = self.chars.clone().take(5).collect();
        if tag == "<?php" {
            for _ in 0..5 {
                self.bump();
            }
        }
    }

    /// Skip whitespace and `//`, `#` and `/* */` comments
    fn skip_trivia(&mut self) {
        loop {
            match self.chars.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('#') => self.skip_line(),
                Some('/') => {
                    let mut ahead = self.chars.clone();
                    ahead.next();
                    match ahead.next() {
                        Some('/') => self.skip_line(),
                        Some('*') => {
                            self.bump();
                            self.bump();
                            let mut prev = '\0';
                            while let Some(c) = self.bump() {
                                if prev == '*' && c == '/' {
                                    break;
                                }
                                prev = c;
                            }
                        }
                        _ => return,
                    }
                }
                _ => return,
            }
        }
    }

    fn skip_line(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn peek_significant(&mut self) -> Option<char> {
        self.skip_trivia();
        self.chars.peek().copied()
    }

    fn expect_char(&mut self, expected: char) -> Result<(), ManifestError> {
        match self.peek_significant() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.error(&format!("expected '{}', found '{}'", expected, c))),
            None => Err(self.error(&format!("expected '{}', found end of file", expected))),
        }
    }

    fn read_word(&mut self) -> String {
        self.skip_trivia();
        let mut word = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                word.push(c);
                self.bump();
            } else {
                break;
            }
        }
        word
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<(), ManifestError> {
        let word = self.read_word();
        if word.eq_ignore_ascii_case(keyword) {
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}', found '{}'", keyword, word)))
        }
    }

    fn parse_value(&mut self) -> Result<PhpValue, ManifestError> {
        match self.peek_significant() {
            Some('\'') => self.parse_single_quoted().map(PhpValue::Str),
            Some('"') => self.parse_double_quoted().map(PhpValue::Str),
            Some('[') => {
                self.bump();
                self.parse_entries(']').map(PhpValue::Array)
            }
            Some(c) if c.is_ascii_digit() || c == '-' => Ok(PhpValue::Str(self.read_word())),
            Some(_) => {
                let word = self.read_word();
                if !word.eq_ignore_ascii_case("array") {
                    return Err(self.error(&format!("unsupported value '{}'", word)));
                }
                self.expect_char('(')?;
                self.parse_entries(')').map(PhpValue::Array)
            }
            None => Err(self.error("unexpected end of file")),
        }
    }

    /// Parse `key => value` pairs up to `close`; a trailing comma is allowed
    fn parse_entries(&mut self, close: char) -> Result<IndexMap<String, PhpValue>, ManifestError> {
        let mut entries = IndexMap::new();
        let mut next_index: usize = 0;
        loop {
            if self.peek_significant() == Some(close) {
                self.bump();
                return Ok(entries);
            }

            let first = self.parse_value()?;
            let (key, value) = if self.peek_significant() == Some('=') {
                self.bump();
                self.expect_char('>')?;
                let PhpValue::Str(key) = first else {
                    return Err(self.error("array keys must be strings or integers"));
                };
                (key, self.parse_value()?)
            } else {
                (next_index.to_string(), first)
            };
            if let Ok(index) = key.parse::<usize>() {
                next_index = next_index.max(index.saturating_add(1));
            }
            entries.insert(key, value);

            match self.peek_significant() {
                Some(',') => {
                    self.bump();
                }
                Some(c) if c == close => {}
                Some(c) => {
                    return Err(self.error(&format!("expected ',' or '{}', found '{}'", close, c)))
                }
                None => return Err(self.error("unterminated array")),
            }
        }
    }

    fn parse_single_quoted(&mut self) -> Result<String, ManifestError> {
        let start_line = self.line;
        self.bump();
        let mut value = String::new();
        loop {
            match self.bump() {
                Some('\\') => match self.chars.peek() {
                    Some(&c) if c == '\\' || c == '\'' => {
                        value.push(c);
                        self.bump();
                    }
                    _ => value.push('\\'),
                },
                Some('\'') => return Ok(value),
                Some(c) => value.push(c),
                None => {
                    return Err(ManifestError::MapParse {
                        line: start_line,
                        message: "unterminated string".to_string(),
                    })
                }
            }
        }
    }

    fn parse_double_quoted(&mut self) -> Result<String, ManifestError> {
        let start_line = self.line;
        self.bump();
        let mut value = String::new();
        loop {
            match self.bump() {
                Some('\\') => {
                    let escaped = match self.chars.peek() {
                        Some('n') => Some('\n'),
                        Some('t') => Some('\t'),
                        Some('r') => Some('\r'),
                        Some(&c) if c == '\\' || c == '"' || c == '$' => Some(c),
                        _ => None,
                    };
                    match escaped {
                        Some(c) => {
                            value.push(c);
                            self.bump();
                        }
                        None => value.push('\\'),
                    }
                }
                Some('"') => return Ok(value),
                Some(c) => value.push(c),
                None => {
                    return Err(ManifestError::MapParse {
                        line: start_line,
                        message: "unterminated string".to_string(),
                    })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Manifest {
        let mut packages = IndexMap::new();
        packages.insert("jetpack-assets".to_string(), "2.1.0.0".to_string());
        packages.insert("jetpack-connection".to_string(), "dev-trunk".to_string());
        Manifest {
            domain: "jetpack".to_string(),
            manifest_type: ManifestType::Plugins,
            packages,
        }
    }

    #[test]
    fn test_render_layout() {
        let expected = "<?php
// i18n-map.php @generated by i18n-map
return array(
  'domain' => 'jetpack',
  'type' => 'plugins',
  'packages' => array(
    'jetpack-assets' => '2.1.0.0',
    'jetpack-connection' => 'dev-trunk',
  ),
);
";
        assert_eq!(render(&sample()), expected);
    }

    #[test]
    fn test_render_empty_packages() {
        let mut manifest = sample();
        manifest.packages.clear();
        manifest.manifest_type = ManifestType::Themes;
        let code = render(&manifest);
        assert!(code.contains("  'type' => 'themes',\n"));
        assert!(code.contains("  'packages' => array(\n  ),\n"));
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("plain"), "'plain'");
        assert_eq!(quote("it's"), r"'it\'s'");
        assert_eq!(quote(r"back\slash"), r"'back\\slash'");
    }

    #[test]
    fn test_parse_rendered_output() {
        let mut manifest = sample();
        manifest.domain = r"o'dd\domain".to_string();
        let parsed = parse(&render(&manifest));
        assert!(parsed.is_ok_and(|m| m == manifest));
    }

    #[test]
    fn test_parse_var_export_style() {
        let content = r#"<?php
/* older generator output */
return array (
  'domain' => "my-theme",
  'type' => 'themes',
  'packages' =>
  array (
    'my-lib' => '2.0.0', # trailing comment
    123 => '1.0',
  ),
);
"#;
        let parsed = parse(content);
        assert!(parsed.is_ok());
        let Ok(manifest) = parsed else {
            return;
        };
        assert_eq!(manifest.domain, "my-theme");
        assert_eq!(manifest.manifest_type, ManifestType::Themes);
        assert_eq!(manifest.packages.get("my-lib").map(String::as_str), Some("2.0.0"));
        assert_eq!(manifest.packages.get("123").map(String::as_str), Some("1.0"));
    }

    #[test]
    fn test_parse_largest_integer_key() {
        let content = "<?php return array('domain' => 'foo', 'type' => 'plugins', \
                       'packages' => array(18446744073709551615 => '1.0', 'jp' => '2.0'));";
        let parsed = parse(content);
        assert!(parsed.is_ok_and(|m| m.packages.get("18446744073709551615").map(String::as_str)
            == Some("1.0")
            && m.packages.len() == 2));
    }

    #[test]
    fn test_parse_short_array_syntax() {
        let content = "<?php return ['domain' => 'foo', 'type' => 'plugins', 'packages' => []];";
        assert!(parse(content).is_ok_and(|m| m.domain == "foo" && m.packages.is_empty()));
    }

    #[test]
    fn test_parse_errors_report_line() {
        let content = "<?php\nreturn array(\n  'domain' => 'foo',\n  'type' => 'plugins'\n  'packages' => array(),\n);\n";
        let err = parse(content);
        assert!(matches!(err, Err(ManifestError::MapParse { line: 5, .. })));

        let bad_type = "<?php return array('domain' => 'foo', 'type' => 'widgets', 'packages' => array());";
        assert!(matches!(
            parse(bad_type),
            Err(ManifestError::InvalidManifestType(_))
        ));

        let missing = "<?php return array('domain' => 'foo', 'type' => 'plugins');";
        assert!(matches!(parse(missing), Err(ManifestError::MapParse { .. })));

        assert!(matches!(
            parse("<?php return 'x';"),
            Err(ManifestError::MapParse { .. })
        ));
    }
}
