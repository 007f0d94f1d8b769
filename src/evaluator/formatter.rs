use crate::interpreter::error::{RuntimeError, RuntimeErrorKind};
use crate::Integer;
use ariadne::{Color, Config, Fmt, IndexType, Label, Report, ReportKind, Source};
use std::ops::Range;

const ARIADNE_MSG: &str = "Ariadne produces valid utf-8 strings";
const ARIADNE_WRITE_MSG: &str = "Write into buffer should not fail.";

pub trait ValueFormatter {
    fn format(&self, value: Integer) -> String;
    fn format_error(&self, error: &RuntimeError) -> String;
}

pub struct DebugFormatter;

impl ValueFormatter for DebugFormatter {
    fn format(&self, value: Integer) -> String {
        format!("{value:?}")
    }

    fn format_error(&self, error: &RuntimeError) -> String {
        format!("{error:?}")
    }
}

/// Plain text, as shown under a run button.
pub struct BasicFormatter;

impl ValueFormatter for BasicFormatter {
    fn format(&self, value: Integer) -> String {
        format!("{value}")
    }

    fn format_error(&self, error: &RuntimeError) -> String {
        format!("Error: {error}")
    }
}

/// Renders errors raised inside an expression as an annotated snippet of it.
pub struct PrettyFormatter<'a> {
    /// Names the snippet, e.g. the block the expression belongs to.
    label: &'a str,
    colored: bool,
}

impl<'a> PrettyFormatter<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            colored: true,
        }
    }

    pub fn without_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn headline(kind: &RuntimeErrorKind) -> &'static str {
        match kind {
            RuntimeErrorKind::SyntaxError(_) => "Could not parse the expression",
            RuntimeErrorKind::UnknownIdentifier(_) => "Read a variable that does not exist",
            RuntimeErrorKind::UnknownArray(_) => "Read an array that does not exist",
            RuntimeErrorKind::IndexOutOfBounds { .. } => "Array index is out of bounds",
            RuntimeErrorKind::DivisionByZero => "Divided by zero",
            RuntimeErrorKind::Overflow => "Result does not fit in a 64-bit integer",
            _ => "Could not run the block",
        }
    }

    fn label_message(&self, kind: &RuntimeErrorKind) -> String {
        let highlight = |text: String| -> String {
            if self.colored {
                text.fg(Color::BrightRed).to_string()
            } else {
                text
            }
        };
        match kind {
            RuntimeErrorKind::SyntaxError(error) => format!("{}", error.kind),
            RuntimeErrorKind::UnknownIdentifier(name) => {
                format!("`{}` has not been declared", highlight(name.to_string()))
            }
            RuntimeErrorKind::UnknownArray(name) => {
                format!("`{}` is not an array", highlight(name.to_string()))
            }
            RuntimeErrorKind::IndexOutOfBounds { name, index } => format!(
                "index {} is outside of `{name}`",
                highlight(index.to_string())
            ),
            RuntimeErrorKind::DivisionByZero => "the right hand side is zero".into(),
            other => other.to_string(),
        }
    }

    /// Empty spans (end of input) are widened to the previous character.
    fn label_range(span: Range<usize>) -> Range<usize> {
        if span.is_empty() && span.start > 0 {
            span.start - 1..span.start
        } else {
            span
        }
    }
}

impl<'a> ValueFormatter for PrettyFormatter<'a> {
    fn format(&self, value: Integer) -> String {
        format!("{value}")
    }

    fn format_error(&self, error: &RuntimeError) -> String {
        let Some(origin) = &error.origin else {
            let header = if self.colored {
                "Error".fg(Color::Red).to_string()
            } else {
                "Error".to_string()
            };
            return format!("[{}] {header}: {}", error.code(), error.kind);
        };

        let label = self.label;
        let range = Self::label_range(origin.span.range());
        let mut output = std::io::Cursor::new(Vec::new());
        Report::build(ReportKind::Error, (label, range.clone()))
            .with_config(
                Config::default()
                    .with_color(self.colored)
                    .with_index_type(IndexType::Byte),
            )
            .with_code(error.code())
            .with_message(Self::headline(&error.kind))
            .with_label(
                Label::new((label, range))
                    .with_message(self.label_message(&error.kind))
                    .with_color(Color::BrightRed),
            )
            .finish()
            .write((label, Source::from(origin.text.as_str())), &mut output)
            .expect(ARIADNE_WRITE_MSG);
        String::from_utf8(output.into_inner()).expect(ARIADNE_MSG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::evaluate;
    use crate::interpreter::context::ExecutionContext;

    #[test]
    fn basic_formats_values_and_errors() {
        let context = ExecutionContext::new();
        assert_eq!(BasicFormatter.format(-3), "-3");
        let error = evaluate("1 / 0", &context).unwrap_err();
        assert_eq!(BasicFormatter.format_error(&error), "Error: Division By Zero");
    }

    #[test]
    fn pretty_quotes_the_expression() {
        let context = ExecutionContext::new();
        let error = evaluate("count + 1", &context).unwrap_err();
        let rendered = PrettyFormatter::new("expression")
            .without_color()
            .format_error(&error);
        assert!(rendered.contains("RT002"), "{rendered}");
        assert!(rendered.contains("count + 1"), "{rendered}");
        assert!(rendered.contains("`count` has not been declared"), "{rendered}");
    }

    #[test]
    fn pretty_without_origin_is_one_line() {
        let error = RuntimeError::from(RuntimeErrorKind::ZeroStep);
        let rendered = PrettyFormatter::new("for").without_color().format_error(&error);
        assert_eq!(rendered, "[RT012] Error: Zero Step");
    }
}
