//! Token-level output sink for syntax generation.
//!
//! Generators never produce raw strings directly; they emit semantically
//! tagged tokens (keyword, identifier, literal, reference link, ...) through
//! the [`SyntaxWriter`] trait so a documentation host can apply styling per
//! token kind. [`TokenWriter`] is the concrete buffer used by the crate's own
//! tests and by hosts that only need flat text.

/// Semantic classification of an emitted token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Parameter,
    /// Punctuation and other literal source text.
    Text,
    /// A literal constant value (string, number, char).
    Literal,
    /// A cross-reference link to another documented item.
    ReferenceLink,
    /// A placeholder message id (unsupported construct, XAML boilerplate).
    Message,
    LineBreak,
    BlockStart,
    BlockEnd,
    SubBlockStart,
    SubBlockEnd,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }
}

/// The output sink contract every generator writes to.
///
/// A complete rendering of one member is one block (`start_block` ..
/// `end_block`), optionally containing sub-blocks (the XAML generator emits
/// one sub-block per alternative usage form). `position` reports the current
/// column so generators can make line-wrap decisions against `max_width`.
pub trait SyntaxWriter {
    fn write_keyword(&mut self, text: &str);
    fn write_identifier(&mut self, text: &str);
    fn write_parameter(&mut self, text: &str);
    fn write_string(&mut self, text: &str);
    fn write_literal(&mut self, text: &str);
    fn write_reference_link(&mut self, target: &str);
    fn write_reference_link_with_text(&mut self, target: &str, display: &str);
    fn write_message(&mut self, message_id: &str);
    fn write_line(&mut self);
    fn start_block(&mut self, language_id: &str, style_id: &str);
    fn end_block(&mut self);
    fn start_sub_block(&mut self, id: &str);
    fn end_sub_block(&mut self);
    /// Current column on the line being written.
    fn position(&self) -> usize;
    /// Column budget after which generators should wrap long lists.
    fn max_width(&self) -> usize;
}

/// Default column budget, matching typical documentation page width.
pub const DEFAULT_MAX_WIDTH: usize = 80;

/// Accumulating [`SyntaxWriter`] implementation.
#[derive(Debug, Clone)]
pub struct TokenWriter {
    tokens: Vec<Token>,
    column: usize,
    max_width: usize,
    open_blocks: usize,
    open_sub_blocks: usize,
}

impl Default for TokenWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenWriter {
    pub fn new() -> Self {
        Self::with_max_width(DEFAULT_MAX_WIDTH)
    }

    pub fn with_max_width(max_width: usize) -> Self {
        TokenWriter {
            tokens: Vec::new(),
            column: 0,
            max_width,
            open_blocks: 0,
            open_sub_blocks: 0,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// True when every block and sub-block opened has been closed again.
    pub fn is_balanced(&self) -> bool {
        self.open_blocks == 0 && self.open_sub_blocks == 0
    }

    /// Flat text rendering of the token stream. Block markers contribute
    /// nothing; line breaks render as '\n'.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            match token.kind {
                TokenKind::BlockStart
                | TokenKind::BlockEnd
                | TokenKind::SubBlockStart
                | TokenKind::SubBlockEnd => {}
                TokenKind::LineBreak => out.push('\n'),
                _ => out.push_str(&token.text),
            }
        }
        out
    }

    /// Message ids emitted into this writer, in order.
    pub fn messages(&self) -> Vec<&str> {
        self.tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Message)
            .map(|t| t.text.as_str())
            .collect()
    }

    /// Ids of the sub-blocks opened in this writer, in order.
    pub fn sub_block_ids(&self) -> Vec<&str> {
        self.tokens
            .iter()
            .filter(|t| t.kind == TokenKind::SubBlockStart)
            .map(|t| t.text.as_str())
            .collect()
    }

    fn push(&mut self, kind: TokenKind, text: &str) {
        self.column += text.len();
        self.tokens.push(Token::new(kind, text));
    }
}

impl SyntaxWriter for TokenWriter {
    fn write_keyword(&mut self, text: &str) {
        self.push(TokenKind::Keyword, text);
    }

    fn write_identifier(&mut self, text: &str) {
        self.push(TokenKind::Identifier, text);
    }

    fn write_parameter(&mut self, text: &str) {
        self.push(TokenKind::Parameter, text);
    }

    fn write_string(&mut self, text: &str) {
        self.push(TokenKind::Text, text);
    }

    fn write_literal(&mut self, text: &str) {
        self.push(TokenKind::Literal, text);
    }

    fn write_reference_link(&mut self, target: &str) {
        let display = crate::model::short_name(target).to_string();
        self.column += display.len();
        self.tokens.push(Token::new(TokenKind::ReferenceLink, display));
    }

    fn write_reference_link_with_text(&mut self, _target: &str, display: &str) {
        self.push(TokenKind::ReferenceLink, display);
    }

    fn write_message(&mut self, message_id: &str) {
        self.push(TokenKind::Message, message_id);
    }

    fn write_line(&mut self) {
        self.tokens.push(Token::new(TokenKind::LineBreak, "\n"));
        self.column = 0;
    }

    fn start_block(&mut self, language_id: &str, style_id: &str) {
        self.open_blocks += 1;
        self.column = 0;
        self.tokens.push(Token::new(
            TokenKind::BlockStart,
            format!("{language_id}:{style_id}"),
        ));
    }

    fn end_block(&mut self) {
        self.open_blocks = self.open_blocks.saturating_sub(1);
        self.tokens.push(Token::new(TokenKind::BlockEnd, ""));
    }

    fn start_sub_block(&mut self, id: &str) {
        self.open_sub_blocks += 1;
        self.column = 0;
        self.tokens.push(Token::new(TokenKind::SubBlockStart, id));
    }

    fn end_sub_block(&mut self) {
        self.open_sub_blocks = self.open_sub_blocks.saturating_sub(1);
        self.tokens.push(Token::new(TokenKind::SubBlockEnd, ""));
    }

    fn position(&self) -> usize {
        self.column
    }

    fn max_width(&self) -> usize {
        self.max_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_concatenates_tokens() {
        let mut writer = TokenWriter::new();
        writer.write_keyword("public");
        writer.write_string(" ");
        writer.write_identifier("Add");
        assert_eq!(writer.text(), "public Add");
    }

    #[test]
    fn test_position_tracks_column() {
        let mut writer = TokenWriter::new();
        writer.write_keyword("public");
        assert_eq!(writer.position(), 6);
        writer.write_line();
        assert_eq!(writer.position(), 0);
        writer.write_string("    ");
        assert_eq!(writer.position(), 4);
    }

    #[test]
    fn test_reference_link_uses_short_name() {
        let mut writer = TokenWriter::new();
        writer.write_reference_link("System.Collections.Generic.List`1");
        assert_eq!(writer.text(), "List");
    }

    #[test]
    fn test_reference_link_agrees_with_type_display_name() {
        let target = "System.Collections.Generic.Dictionary`2";
        let mut writer = TokenWriter::new();
        writer.write_reference_link(target);
        assert_eq!(
            writer.text(),
            crate::model::TypeReference::named(target).display_name()
        );
    }

    #[test]
    fn test_block_balance() {
        let mut writer = TokenWriter::new();
        writer.start_block("CSharp", "declaration");
        assert!(!writer.is_balanced());
        writer.end_block();
        assert!(writer.is_balanced());
    }

    #[test]
    fn test_sub_block_ids_collected() {
        let mut writer = TokenWriter::new();
        writer.start_block("XamlUsage", "usage");
        writer.start_sub_block("xamlObjectElementUsage");
        writer.end_sub_block();
        writer.start_sub_block("xamlAttributeUsage");
        writer.end_sub_block();
        writer.end_block();
        assert_eq!(
            writer.sub_block_ids(),
            vec!["xamlObjectElementUsage", "xamlAttributeUsage"]
        );
    }

    #[test]
    fn test_messages_collected() {
        let mut writer = TokenWriter::new();
        writer.write_message("UnsupportedOperator_CSharp");
        assert_eq!(writer.messages(), vec!["UnsupportedOperator_CSharp"]);
    }
}
