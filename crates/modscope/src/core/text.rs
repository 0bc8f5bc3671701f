//! Stack-based text accumulator
//!
//! [`TextBuilder`] knows nothing about diagrams. It keeps one working buffer
//! plus a stack of saved outer buffers; the stack depth doubles as the
//! indentation level applied after every [`TextBuilder::newline`].
//!
//! ```
//! use modscope::core::TextBuilder;
//!
//! let mut text = TextBuilder::new();
//! text.append("A").push().append("B").pop();
//! assert_eq!(text.output(), "AB");
//! ```

/// Character repeated once per nesting level after a line break
pub const INDENT: char = '\t';

/// Build a run of `size` indentation characters
pub fn tabs(size: usize) -> String {
    std::iter::repeat(INDENT).take(size).collect()
}

/// Append-only text buffer with a nesting stack
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuilder {
    buffer: String,
    stack: Vec<String>,
}

impl TextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concatenate `text` to the current buffer
    pub fn append(&mut self, text: &str) -> &mut Self {
        self.buffer.push_str(text);
        self
    }

    /// Line break followed by one indent per stack level
    pub fn newline(&mut self) -> &mut Self {
        let indent = tabs(self.stack.len());
        self.append("\n").append(&indent)
    }

    pub fn tab(&mut self) -> &mut Self {
        self.buffer.push(INDENT);
        self
    }

    /// Save the current buffer and start an empty one (entering a block)
    pub fn push(&mut self) -> &mut Self {
        let outer = std::mem::take(&mut self.buffer);
        self.stack.push(outer);
        self
    }

    /// Put the saved buffer back in front of the current one (leaving a block)
    ///
    /// Popping with an empty stack is a programming error: debug builds
    /// assert, release builds leave the buffer untouched.
    pub fn pop(&mut self) -> &mut Self {
        debug_assert!(!self.stack.is_empty(), "pop without matching push");
        if let Some(mut outer) = self.stack.pop() {
            outer.push_str(&self.buffer);
            self.buffer = outer;
        }
        self
    }

    /// Reset the current buffer, keeping the stack
    pub fn clear(&mut self) -> &mut Self {
        self.buffer.clear();
        self
    }

    /// Reset both the buffer and the stack
    pub fn restart(&mut self) -> &mut Self {
        self.stack.clear();
        self.clear()
    }

    /// Current nesting depth
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The current buffer
    pub fn output(&self) -> &str {
        &self.buffer
    }

    pub fn into_output(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_newline() {
        assert_eq!(TextBuilder::new().newline().output(), "\n");
    }

    #[test]
    fn test_newline_indents_by_depth() {
        let mut text = TextBuilder::new();
        text.push().push().newline();
        assert_eq!(text.output(), "\n\t\t");
    }

    #[test]
    fn test_tab() {
        assert_eq!(TextBuilder::new().tab().output(), "\t");
    }

    #[test]
    fn test_clear() {
        assert_eq!(TextBuilder::new().append("A").clear().output(), "");
    }

    #[test]
    fn test_restart() {
        let mut text = TextBuilder::new();
        text.append("A").push().restart();
        assert_eq!(text.output(), "");
        assert_eq!(text.depth(), 0);
    }

    #[test]
    fn test_append() {
        let mut text = TextBuilder::new();
        assert_eq!(text.append("A").output(), "A");
        assert_eq!(text.append("B").output(), "AB");
    }

    #[test]
    fn test_push() {
        let mut text = TextBuilder::new();
        assert_eq!(text.append("A").push().output(), "");
        assert_eq!(text.pop().output(), "A");
    }

    #[test]
    fn test_pop() {
        let mut text = TextBuilder::new();
        assert_eq!(text.append("A").push().append("B").pop().output(), "AB");
    }

    #[test]
    fn test_tabs() {
        assert_eq!(tabs(0), "");
        assert_eq!(tabs(3), "\t\t\t");
    }

    #[derive(Debug, Clone)]
    enum Op {
        Append(String),
        Nested(Vec<String>),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            "[a-z]{0,4}".prop_map(Op::Append),
            prop::collection::vec("[a-z]{0,4}", 0..4).prop_map(Op::Nested),
        ]
    }

    proptest! {
        #[test]
        fn push_pop_inlines_nested_content(ops in prop::collection::vec(op_strategy(), 0..12)) {
            let mut text = TextBuilder::new();
            let mut expected = String::new();
            for op in &ops {
                match op {
                    Op::Append(s) => {
                        text.append(s);
                        expected.push_str(s);
                    }
                    Op::Nested(parts) => {
                        text.push();
                        for part in parts {
                            text.append(part);
                            expected.push_str(part);
                        }
                        text.pop();
                    }
                }
            }
            prop_assert_eq!(text.depth(), 0);
            prop_assert_eq!(text.output(), expected.as_str());
        }
    }
}
