//! Single-pass parser for the mustache subset used by the workflow templates.
//!
//! The scanner walks the source left to right, splitting literal text from
//! tags delimited by the current delimiter pair, and builds the section tree
//! as it goes. Supported tags:
//!
//! | Tag            | Meaning                                   |
//! |----------------|-------------------------------------------|
//! | `{{Name}}`     | escaped variable                          |
//! | `{{&Name}}`    | raw variable (also `{{{Name}}}`)          |
//! | `{{#Name}}`    | section (conditional or repeated)         |
//! | `{{^Name}}`    | inverted section                          |
//! | `{{/Name}}`    | section close                             |
//! | `{{! text }}`  | comment                                   |
//! | `{{=<% %>=}}`  | set delimiters for the rest of the source |
//!
//! Block tags (everything except variables) that sit alone on a line take the
//! whole line with them, so section markers never leave blank lines behind.

use crate::error::{Result, WorkflowGenError};

const DEFAULT_OPEN: &str = "{{";
const DEFAULT_CLOSE: &str = "}}";

/// A parsed template fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    Text(String),
    Variable {
        name: String,
        escape: bool,
    },
    Section {
        name: String,
        inverted: bool,
        children: Vec<Node>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Variable,
    Raw,
    Section,
    Inverted,
    Close,
    Comment,
    Delimiter,
    Partial,
}

impl TagKind {
    fn can_stand_alone(self) -> bool {
        matches!(
            self,
            Self::Section | Self::Inverted | Self::Close | Self::Comment | Self::Delimiter
        )
    }
}

struct Tag {
    kind: TagKind,
    /// Trimmed tag body without sigils.
    content: String,
    line: usize,
    start: usize,
    end: usize,
}

struct OpenSection {
    name: String,
    inverted: bool,
    line: usize,
    children: Vec<Node>,
}

/// Parse `source` into a node tree, failing on any structural error.
pub(crate) fn parse(source: &str) -> Result<Vec<Node>> {
    Parser {
        source,
        open: DEFAULT_OPEN.to_string(),
        close: DEFAULT_CLOSE.to_string(),
        pos: 0,
        root: Vec::new(),
        stack: Vec::new(),
    }
    .run()
}

struct Parser<'s> {
    source: &'s str,
    open: String,
    close: String,
    /// Start of the literal text run not yet emitted.
    pos: usize,
    root: Vec<Node>,
    stack: Vec<OpenSection>,
}

impl<'s> Parser<'s> {
    fn run(mut self) -> Result<Vec<Node>> {
        let source = self.source;

        while let Some(offset) = source[self.pos..].find(self.open.as_str()) {
            let start = self.pos + offset;
            let tag = self.read_tag(start)?;

            let mut text = &source[self.pos..start];
            let mut next = tag.end;
            if tag.kind.can_stand_alone() {
                if let Some((indent, line_end)) = self.standalone_bounds(start, tag.end) {
                    text = &text[..text.len() - indent];
                    next = line_end;
                }
            }

            self.push_text(text);
            self.pos = next;
            self.apply(tag)?;
        }

        self.push_text(&source[self.pos..]);

        if let Some(open) = self.stack.pop() {
            return Err(WorkflowGenError::UnclosedSection {
                line: open.line,
                name: open.name,
            });
        }

        Ok(self.root)
    }

    /// Read the tag whose opening delimiter starts at `start`.
    fn read_tag(&self, start: usize) -> Result<Tag> {
        let source = self.source;
        let line = line_number(source, start);
        let inner = start + self.open.len();

        let (kind, body_start, terminator) = match source[inner..].chars().next() {
            Some('{') => (TagKind::Raw, inner + 1, format!("}}{}", self.close)),
            Some('=') => (TagKind::Delimiter, inner + 1, format!("={}", self.close)),
            Some('&') => (TagKind::Raw, inner + 1, self.close.clone()),
            Some('#') => (TagKind::Section, inner + 1, self.close.clone()),
            Some('^') => (TagKind::Inverted, inner + 1, self.close.clone()),
            Some('/') => (TagKind::Close, inner + 1, self.close.clone()),
            Some('!') => (TagKind::Comment, inner + 1, self.close.clone()),
            Some('>') => (TagKind::Partial, inner + 1, self.close.clone()),
            _ => (TagKind::Variable, inner, self.close.clone()),
        };

        let body_len = source[body_start..]
            .find(terminator.as_str())
            .ok_or_else(|| WorkflowGenError::UnclosedTag {
                line,
                close: terminator.clone(),
            })?;

        Ok(Tag {
            kind,
            content: source[body_start..body_start + body_len].trim().to_string(),
            line,
            start,
            end: body_start + body_len + terminator.len(),
        })
    }

    /// If the tag spanning `start..end` is the only non-blank content of its
    /// line, return the indentation width before it and the offset just past
    /// the line's newline.
    fn standalone_bounds(&self, start: usize, end: usize) -> Option<(usize, usize)> {
        let source = self.source;
        let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
        if line_start < self.pos || !is_blank(&source[line_start..start]) {
            return None;
        }

        let (trailing, line_end) = match source[end..].find('\n') {
            Some(i) => (&source[end..end + i], end + i + 1),
            None => (&source[end..], source.len()),
        };
        if !is_blank(trailing) {
            return None;
        }

        Some((start - line_start, line_end))
    }

    fn apply(&mut self, tag: Tag) -> Result<()> {
        match tag.kind {
            TagKind::Variable | TagKind::Raw => {
                self.require_name(&tag)?;
                self.push_node(Node::Variable {
                    name: tag.content,
                    escape: tag.kind == TagKind::Variable,
                });
            }
            TagKind::Section | TagKind::Inverted => {
                self.require_name(&tag)?;
                self.stack.push(OpenSection {
                    name: tag.content,
                    inverted: tag.kind == TagKind::Inverted,
                    line: tag.line,
                    children: Vec::new(),
                });
            }
            TagKind::Close => {
                let open = self.stack.pop().ok_or_else(|| {
                    WorkflowGenError::UnmatchedSectionClose {
                        line: tag.line,
                        name: tag.content.clone(),
                    }
                })?;
                if open.name != tag.content {
                    return Err(WorkflowGenError::MismatchedSectionClose {
                        line: tag.line,
                        expected: open.name,
                        found: tag.content,
                    });
                }
                self.push_node(Node::Section {
                    name: open.name,
                    inverted: open.inverted,
                    children: open.children,
                });
            }
            TagKind::Comment => {}
            TagKind::Delimiter => self.set_delimiters(&tag)?,
            TagKind::Partial => {
                return Err(WorkflowGenError::InvalidTag {
                    line: tag.line,
                    tag: self.source[tag.start..tag.end].to_string(),
                });
            }
        }
        Ok(())
    }

    fn set_delimiters(&mut self, tag: &Tag) -> Result<()> {
        if let Some(open) = self.stack.last() {
            return Err(WorkflowGenError::DelimiterInSection {
                line: tag.line,
                section: open.name.clone(),
            });
        }

        let parts: Vec<&str> = tag.content.split_whitespace().collect();
        match parts.as_slice() {
            [open, close] if !open.contains('=') && !close.contains('=') => {
                self.open = open.to_string();
                self.close = close.to_string();
                Ok(())
            }
            _ => Err(WorkflowGenError::InvalidDelimiter {
                line: tag.line,
                directive: tag.content.clone(),
            }),
        }
    }

    fn require_name(&self, tag: &Tag) -> Result<()> {
        if tag.content.is_empty() {
            return Err(WorkflowGenError::InvalidTag {
                line: tag.line,
                tag: self.source[tag.start..tag.end].to_string(),
            });
        }
        Ok(())
    }

    fn push_text(&mut self, text: &str) {
        if !text.is_empty() {
            self.push_node(Node::Text(text.to_string()));
        }
    }

    fn push_node(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(open) => open.children.push(node),
            None => self.root.push(node),
        }
    }
}

fn is_blank(s: &str) -> bool {
    s.chars().all(|c| c == ' ' || c == '\t' || c == '\r')
}

fn line_number(source: &str, offset: usize) -> usize {
    source[..offset].bytes().filter(|&b| b == b'\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Node {
        Node::Text(s.to_string())
    }

    fn var(name: &str) -> Node {
        Node::Variable {
            name: name.to_string(),
            escape: true,
        }
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(parse("name: Build\n").unwrap(), vec![text("name: Build\n")]);
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_variables() {
        let nodes = parse("a {{ Name }} b {{&Raw}} c {{{Triple}}}").unwrap();
        assert_eq!(
            nodes,
            vec![
                text("a "),
                var("Name"),
                text(" b "),
                Node::Variable {
                    name: "Raw".into(),
                    escape: false
                },
                text(" c "),
                Node::Variable {
                    name: "Triple".into(),
                    escape: false
                },
            ]
        );
    }

    #[test]
    fn test_inline_section() {
        let nodes = parse("[{{#Items}}{{.}}{{/Items}}]").unwrap();
        assert_eq!(
            nodes,
            vec![
                text("["),
                Node::Section {
                    name: "Items".into(),
                    inverted: false,
                    children: vec![var(".")],
                },
                text("]"),
            ]
        );
    }

    #[test]
    fn test_standalone_section_lines_are_removed() {
        let nodes = parse("on:\n  {{#Flag}}\n  pull_request:\n  {{/Flag}}\nend\n").unwrap();
        assert_eq!(
            nodes,
            vec![
                text("on:\n"),
                Node::Section {
                    name: "Flag".into(),
                    inverted: false,
                    children: vec![text("  pull_request:\n")],
                },
                text("end\n"),
            ]
        );
    }

    #[test]
    fn test_standalone_at_end_of_input() {
        let nodes = parse("{{#A}}\nx\n{{/A}}").unwrap();
        assert_eq!(
            nodes,
            vec![Node::Section {
                name: "A".into(),
                inverted: false,
                children: vec![text("x\n")],
            }]
        );
    }

    #[test]
    fn test_crlf_standalone() {
        let nodes = parse("{{#A}}\r\nx\r\n{{/A}}\r\n").unwrap();
        assert_eq!(
            nodes,
            vec![Node::Section {
                name: "A".into(),
                inverted: false,
                children: vec![text("x\r\n")],
            }]
        );
    }

    #[test]
    fn test_variable_is_never_standalone() {
        let nodes = parse("{{Name}}\n").unwrap();
        assert_eq!(nodes, vec![var("Name"), text("\n")]);
    }

    #[test]
    fn test_comment_is_dropped() {
        let nodes = parse("a{{! note }}b\n{{! whole line }}\nc").unwrap();
        assert_eq!(nodes, vec![text("a"), text("b\n"), text("c")]);
    }

    #[test]
    fn test_set_delimiters() {
        let nodes = parse("{{=<% %>=}}\n${{ env.X }} <%Name%>\n").unwrap();
        assert_eq!(
            nodes,
            vec![text("${{ env.X }} "), var("Name"), text("\n")]
        );
    }

    #[test]
    fn test_inverted_section() {
        let nodes = parse("{{^Skip}}run{{/Skip}}").unwrap();
        assert_eq!(
            nodes,
            vec![Node::Section {
                name: "Skip".into(),
                inverted: true,
                children: vec![text("run")],
            }]
        );
    }

    #[test]
    fn test_unclosed_tag() {
        let err = parse("line\n{{Name").unwrap_err();
        assert!(matches!(err, WorkflowGenError::UnclosedTag { line: 2, .. }));
    }

    #[test]
    fn test_unclosed_section() {
        let err = parse("{{#A}}\nbody\n").unwrap_err();
        assert!(matches!(err, WorkflowGenError::UnclosedSection { line: 1, ref name } if name == "A"));
    }

    #[test]
    fn test_unmatched_close() {
        let err = parse("text\n{{/A}}").unwrap_err();
        assert!(matches!(err, WorkflowGenError::UnmatchedSectionClose { line: 2, .. }));
    }

    #[test]
    fn test_mismatched_close() {
        let err = parse("{{#A}}{{#B}}{{/A}}{{/B}}").unwrap_err();
        assert!(matches!(
            err,
            WorkflowGenError::MismatchedSectionClose { ref expected, ref found, .. }
                if expected == "B" && found == "A"
        ));
    }

    #[test]
    fn test_delimiter_inside_section_is_rejected() {
        let err = parse("{{#A}}\n{{=<% %>=}}\n<%/A%>").unwrap_err();
        assert!(matches!(err, WorkflowGenError::DelimiterInSection { line: 2, .. }));
    }

    #[test]
    fn test_invalid_delimiter_directive() {
        assert!(matches!(
            parse("{{=<%=}}").unwrap_err(),
            WorkflowGenError::InvalidDelimiter { .. }
        ));
        assert!(matches!(
            parse("{{=a b c=}}").unwrap_err(),
            WorkflowGenError::InvalidDelimiter { .. }
        ));
    }

    #[test]
    fn test_empty_and_partial_tags_are_rejected() {
        assert!(matches!(
            parse("{{ }}").unwrap_err(),
            WorkflowGenError::InvalidTag { .. }
        ));
        assert!(matches!(
            parse("{{> header}}").unwrap_err(),
            WorkflowGenError::InvalidTag { ref tag, .. } if tag == "{{> header}}"
        ));
    }

    #[test]
    fn test_old_delimiters_are_literal_after_switch() {
        let nodes = parse("{{=<% %>=}}{{Name}}").unwrap();
        assert_eq!(nodes, vec![text("{{Name}}")]);
    }
}
