use super::error::RunError;
use super::RunReport;
use crate::evaluator::formatter::{PrettyFormatter as PrettyValueFormatter, ValueFormatter};

pub trait ReportFormatter {
    /// Renders the final variables, arrays and outputs.
    fn format(&self, report: &RunReport) -> String;
    fn format_error(&self, error: &RunError) -> String;

    /// The report followed by its error, if any.
    fn render(&self, report: &RunReport) -> String {
        let body = self.format(report);
        let error = report.error.as_ref().map(|error| self.format_error(error));
        [Some(body), error]
            .into_iter()
            .flatten()
            .filter(|section| !section.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub struct DebugFormatter;

impl ReportFormatter for DebugFormatter {
    fn format(&self, report: &RunReport) -> String {
        format!(
            "{:?}\n{:?}\n{:?}",
            report.variables, report.arrays, report.outputs
        )
    }

    fn format_error(&self, error: &RunError) -> String {
        format!("{error:?}")
    }
}

/// One `name = value` line per variable, then `name = [a, b]` per array, then
/// the output log. Empty sections are left out.
pub struct BasicFormatter;

impl BasicFormatter {
    fn format_body(report: &RunReport) -> String {
        let variables = report
            .variables
            .iter()
            .map(|(name, value)| format!("{name} = {value}"))
            .collect::<Vec<_>>()
            .join("\n");
        let arrays = report
            .arrays
            .iter()
            .map(|(name, values)| {
                let values = values
                    .iter()
                    .map(|value| value.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{name} = [{values}]")
            })
            .collect::<Vec<_>>()
            .join("\n");
        let outputs = report.outputs.join("\n");

        [variables, arrays, outputs]
            .into_iter()
            .filter(|section| !section.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl ReportFormatter for BasicFormatter {
    fn format(&self, report: &RunReport) -> String {
        Self::format_body(report)
    }

    fn format_error(&self, error: &RunError) -> String {
        format!("Error: {}", error.error)
    }
}

/// Basic output with annotated error snippets.
pub struct PrettyFormatter {
    colored: bool,
}

impl PrettyFormatter {
    pub fn new() -> Self {
        Self { colored: true }
    }

    pub fn without_color(mut self) -> Self {
        self.colored = false;
        self
    }
}

impl Default for PrettyFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for PrettyFormatter {
    fn format(&self, report: &RunReport) -> String {
        BasicFormatter::format_body(report)
    }

    fn format_error(&self, error: &RunError) -> String {
        let label = format!("statement {}", error.statement + 1);
        let formatter = PrettyValueFormatter::new(&label);
        let formatter = if self.colored {
            formatter
        } else {
            formatter.without_color()
        };
        formatter.format_error(&error.error)
    }
}

/// Machine readable report.
pub struct JsonFormatter;

impl JsonFormatter {
    fn to_value(report: &RunReport) -> serde_json::Value {
        let variables: Vec<_> = report
            .variables
            .iter()
            .map(|(name, value)| serde_json::json!({ "name": name, "value": value }))
            .collect();
        let arrays: Vec<_> = report
            .arrays
            .iter()
            .map(|(name, values)| serde_json::json!({ "name": name, "values": values }))
            .collect();
        let error = report.error.as_ref().map(Self::error_value);
        serde_json::json!({
            "variables": variables,
            "arrays": arrays,
            "outputs": report.outputs,
            "error": error,
        })
    }

    fn error_value(error: &RunError) -> serde_json::Value {
        let position = error
            .error
            .origin
            .as_ref()
            .map(|origin| origin.span.start);
        serde_json::json!({
            "statement": error.statement,
            "code": error.error.code(),
            "message": error.error.to_string(),
            "position": position,
        })
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &RunReport) -> String {
        serde_json::to_string_pretty(&Self::to_value(report))
            .expect("JSON values always serialize")
    }

    fn format_error(&self, error: &RunError) -> String {
        Self::error_value(error).to_string()
    }

    /// The error is already part of the JSON document.
    fn render(&self, report: &RunReport) -> String {
        self.format(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::context::ExecutionContext;
    use crate::interpreter::error::{RuntimeError, RuntimeErrorKind};

    fn report() -> RunReport {
        let mut context = ExecutionContext::new();
        context.declare_variable("a");
        context.set_variable("a", 5).unwrap();
        context.declare_array("arr", 3).unwrap();
        context.set_array_value("arr", 1, 7).unwrap();
        context.append_output("answer = 6");
        RunReport::new(context, None)
    }

    #[test]
    fn basic_layout() {
        assert_eq!(
            BasicFormatter.render(&report()),
            "a = 5\narr = [0, 7, 0]\nanswer = 6"
        );
    }

    #[test]
    fn basic_skips_empty_sections() {
        let mut report = report();
        report.arrays.clear();
        report.error = Some(RunError {
            statement: 2,
            error: RuntimeError::from(RuntimeErrorKind::ZeroStep),
        });
        assert_eq!(
            BasicFormatter.render(&report),
            "a = 5\nanswer = 6\nError: Zero Step"
        );
    }

    #[test]
    fn json_keeps_declaration_order() {
        let value: serde_json::Value =
            serde_json::from_str(&JsonFormatter.render(&report())).unwrap();
        assert_eq!(value["variables"][0]["name"], "a");
        assert_eq!(value["arrays"][0]["values"], serde_json::json!([0, 7, 0]));
        assert!(value["error"].is_null());
    }
}
