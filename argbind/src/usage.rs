//! Usage text rendering

use crate::schema::ParamSpec;
use crate::table::SchemaTable;

const SHORT_COLUMN_WIDTH: usize = 15;
const LONG_COLUMN_WIDTH: usize = 25;

/// Render the help text for a schema
///
/// Layout: a blank line, the process name, a blank line, the indented
/// description followed by a blank line (when there is one), the required
/// parameters, a blank line, then the optional parameters with the help
/// parameter first. Parameters keep their declaration order within a group.
#[must_use]
pub fn render_usage<T>(process_name: &str, table: &SchemaTable<T>) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(process_name);
    out.push_str("\n\n");
    if let Some(details) = table.details() {
        out.push_str("    ");
        out.push_str(details);
        out.push_str("\n\n");
    }

    let specs = table.descriptors().iter().map(|d| d.spec());
    for spec in specs.clone().filter(|s| !s.optional) {
        out.push_str(&usage_line(spec));
        out.push('\n');
    }
    out.push('\n');
    for spec in specs.filter(|s| s.optional) {
        out.push_str(&usage_line(spec));
        out.push('\n');
    }
    out
}

/// Format one parameter as a usage line
///
/// Missing keys leave their column blank rather than shifting the others.
#[must_use]
pub fn usage_line(spec: &ParamSpec) -> String {
    let short = spec.short.as_ref().map(|k| format!("-{k}")).unwrap_or_default();
    let long = spec.long.as_ref().map(|k| format!("--{k}")).unwrap_or_default();
    let optional = if spec.optional { " (Optional)" } else { "" };
    format!(
        "  {short:<short_width$}{long:<long_width$}{}{optional}",
        spec.details,
        short_width = SHORT_COLUMN_WIDTH,
        long_width = LONG_COLUMN_WIDTH,
    )
}

/// Display name of the running process
///
/// The executable's file stem, falling back to the first command-line
/// argument.
#[must_use]
pub fn process_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .or_else(|| std::env::args().next())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldAccess, SchemaBuilder};

    #[derive(Debug, Default)]
    struct Config {
        string: String,
        array: Vec<String>,
    }

    fn table(details: Option<&str>) -> SchemaTable<Config> {
        let mut builder = SchemaBuilder::new()
            .param(
                ParamSpec::single()
                    .short("s")
                    .long("str")
                    .details("String value. e.g. xyzzy")
                    .field("string"),
                FieldAccess::scalar(|c: &mut Config| &mut c.string),
            )
            .param(
                ParamSpec::array()
                    .short("a")
                    .details("Array of strings. e.g. a b c")
                    .optional()
                    .field("array"),
                FieldAccess::collection(|c: &mut Config| &mut c.array),
            );
        if let Some(details) = details {
            builder = builder.details(details);
        }
        SchemaTable::build(builder.build().unwrap()).unwrap()
    }

    #[test]
    fn test_usage_line_columns() {
        let spec = ParamSpec::single().short("s").long("str").details("String value.");
        assert_eq!(
            usage_line(&spec),
            "  -s             --str                    String value."
        );

        let spec = ParamSpec::array().short("a").details("Array.").optional();
        assert_eq!(
            usage_line(&spec),
            "  -a                                      Array. (Optional)"
        );

        let spec = ParamSpec::flag().long("verbose").details("Talk more.");
        assert_eq!(
            usage_line(&spec),
            "                 --verbose                Talk more."
        );
    }

    #[test]
    fn test_render_with_description() {
        let expected = concat!(
            "\n",
            "tool\n",
            "\n",
            "    Test params class\n",
            "\n",
            "  -s             --str                    String value. e.g. xyzzy\n",
            "\n",
            "  -h             --help                   Prints this help text (Optional)\n",
            "  -a                                      Array of strings. e.g. a b c (Optional)\n",
        );
        assert_eq!(render_usage("tool", &table(Some("Test params class"))), expected);
    }

    #[test]
    fn test_render_without_description() {
        let expected = concat!(
            "\n",
            "tool\n",
            "\n",
            "  -s             --str                    String value. e.g. xyzzy\n",
            "\n",
            "  -h             --help                   Prints this help text (Optional)\n",
            "  -a                                      Array of strings. e.g. a b c (Optional)\n",
        );
        assert_eq!(render_usage("tool", &table(None)), expected);
    }

    #[test]
    fn test_process_name_not_empty() {
        assert!(!process_name().is_empty());
    }
}
