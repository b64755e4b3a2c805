//! Source emission helpers for the generated programs.
//!
//! Every user-supplied string that ends up in emitted source goes through a
//! [`Dialect`]: string literals, comment text and payload values. Templates
//! only ever interpolate fragments produced here, so an SSID containing a
//! quote or an origin containing a backslash cannot break out of its literal.

use crate::params::PayloadValue;
use crate::platform::BoolIdiom;

/// Target language of an emitted program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Arduino C++
    Cpp,
    Python,
}

impl Dialect {
    /// Quote and escape `value` as a string literal
    pub fn string_literal(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('"');
        for ch in value.chars() {
            match ch {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                // `??` starts a trigraph in older C++ dialects
                '?' if matches!(self, Self::Cpp) => out.push_str("\\?"),
                // octal for C++, whose hex escapes swallow following hex digits
                c if (c as u32) < 0x20 || c as u32 == 0x7f => match self {
                    Self::Cpp => out.push_str(&format!("\\{:03o}", c as u32)),
                    Self::Python => out.push_str(&format!("\\x{:02x}", c as u32)),
                },
                c => out.push(c),
            }
        }
        out.push('"');
        out
    }

    /// Make `value` safe to place inside a single-line comment.
    ///
    /// Line breaks are flattened. For C++, block comment delimiters are split
    /// and backslashes become `/`, since a backslash before the line end
    /// (trailing spaces included) splices the next line into the comment.
    pub fn comment_text(&self, value: &str) -> String {
        let flat: String = value
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect();
        match self {
            Self::Cpp => flat
                .replace('\\', "/")
                .replace("??/", "?? /")
                .replace("*/", "* /")
                .replace("/*", "/ *"),
            Self::Python => flat,
        }
    }

    /// Render a coerced payload value as a source expression
    pub fn payload_value(&self, value: &PayloadValue, bools: BoolIdiom) -> String {
        match value {
            PayloadValue::Bool(true) => bools.true_literal.to_string(),
            PayloadValue::Bool(false) => bools.false_literal.to_string(),
            PayloadValue::Text(s) => self.string_literal(s),
            numeric => numeric.numeric_literal().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CPP_BOOLS: BoolIdiom = BoolIdiom {
        true_literal: "true",
        false_literal: "false",
    };

    #[test]
    fn test_plain_string_literal() {
        assert_eq!(Dialect::Cpp.string_literal("admin:admin"), "\"admin:admin\"");
        assert_eq!(Dialect::Python.string_literal("AE-SL"), "\"AE-SL\"");
    }

    #[test]
    fn test_quotes_and_backslashes_are_escaped() {
        assert_eq!(
            Dialect::Cpp.string_literal(r#"my "home" \ net"#),
            r#""my \"home\" \\ net""#
        );
        assert_eq!(
            Dialect::Python.string_literal("a\"b\nc"),
            "\"a\\\"b\\nc\""
        );
    }

    #[test]
    fn test_control_characters_are_escaped() {
        assert_eq!(Dialect::Cpp.string_literal("a\u{1}b"), "\"a\\001b\"");
        assert_eq!(Dialect::Python.string_literal("a\u{1}b"), "\"a\\x01b\"");
    }

    #[test]
    fn test_trigraphs_only_escaped_for_cpp() {
        assert_eq!(Dialect::Cpp.string_literal("??="), "\"\\?\\?=\"");
        assert_eq!(Dialect::Python.string_literal("??="), "\"??=\"");
    }

    #[test]
    fn test_comment_text() {
        assert_eq!(Dialect::Cpp.comment_text("ae */ evil"), "ae * / evil");
        assert_eq!(Dialect::Cpp.comment_text("line\nbreak"), "line break");
        assert_eq!(Dialect::Python.comment_text("x */ y"), "x */ y");
    }

    #[test]
    fn test_cpp_comment_cannot_splice_lines() {
        assert_eq!(Dialect::Cpp.comment_text("dir\\"), "dir/");
        assert_eq!(Dialect::Cpp.comment_text("dir\\  "), "dir/  ");
        assert_eq!(Dialect::Cpp.comment_text("a\\b\\"), "a/b/");
        assert_eq!(Dialect::Cpp.comment_text("q??/"), "q?? /");
        for name in ["x\\", "x\\ \t", "x??/", "\\\\"] {
            let text = Dialect::Cpp.comment_text(name);
            assert!(!text.contains('\\'), "{text}");
            assert!(!text.trim_end().ends_with("??/"), "{text}");
        }
        assert_eq!(Dialect::Python.comment_text("dir\\"), "dir\\");
    }

    #[test]
    fn test_payload_values() {
        let cpp = Dialect::Cpp;
        assert_eq!(cpp.payload_value(&PayloadValue::Int(60), CPP_BOOLS), "60");
        assert_eq!(
            cpp.payload_value(&PayloadValue::Float(25.5), CPP_BOOLS),
            "25.5"
        );
        assert_eq!(
            cpp.payload_value(&PayloadValue::Bool(false), CPP_BOOLS),
            "false"
        );
        assert_eq!(
            cpp.payload_value(&PayloadValue::Text("o\"k".into()), CPP_BOOLS),
            "\"o\\\"k\""
        );
    }
}
