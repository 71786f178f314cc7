//! Show command implementation.
//!
//! Loads a built schema and prints the layer visibility a widget would
//! have for a value. Handy for checking segment wiring without a runtime.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::display::{visibility, LayerVisibility};
use crate::error::{LcdError, Result};
use crate::output::Printer;
use crate::schema::Schema;
use crate::segment::NumberFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Show which layers a widget lights for a value
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Schema file written by `lcdc build`
    pub schema: PathBuf,

    /// Widget name
    pub widget: String,

    /// Value to display (on/off, a digit, a level, a number or text)
    #[arg(allow_hyphen_values = true)]
    pub value: String,

    /// Pad number widgets with leading zeros
    #[arg(long)]
    pub leading_zeros: bool,

    /// Fixed number of decimal places for number widgets
    #[arg(long)]
    pub decimals: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub fn run(args: ShowArgs, printer: &Printer) -> Result<()> {
    let schema = Schema::load(&args.schema)?;
    let widget = schema.widget(&args.widget).ok_or_else(|| LcdError::Value {
        message: format!("no widget named '{}'", args.widget),
        help: Some(available_widgets(&schema)),
    })?;

    let format = NumberFormat::new()
        .leading_zeros(args.leading_zeros)
        .decimal_places(args.decimals);
    let layers = visibility(widget, &args.value, format)?;

    let rendered = match args.format {
        OutputFormat::Text => {
            printer.info(
                "Showing",
                &format!("{} {} = {:?}", widget.kind(), widget.name(), args.value),
            );
            render_text(&layers)
        }
        OutputFormat::Json => serde_json::to_string_pretty(&layers).map_err(|e| LcdError::Build {
            message: format!("Failed to serialize visibility: {}", e),
            help: None,
        })?,
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", rendered)?;
    Ok(())
}

fn render_text(layers: &[LayerVisibility]) -> String {
    layers
        .iter()
        .map(|l| format!("{} {}", if l.visible { "on " } else { "off" }, l.layer))
        .collect::<Vec<_>>()
        .join("\n")
}

fn available_widgets(schema: &Schema) -> String {
    if schema.widgets.is_empty() {
        return "the schema has no widgets".to_string();
    }
    let names: Vec<&str> = schema.widgets.keys().map(String::as_str).collect();
    format!("available widgets: {}", names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{RangeWidget, WidgetDescriptor};
    use tempfile::tempdir;

    fn schema_file(dir: &std::path::Path) -> PathBuf {
        let mut schema = Schema::new("dash.psb", 10, 10);
        schema.widgets.insert(
            "bars".to_string(),
            WidgetDescriptor::Range(RangeWidget {
                name: "bars".to_string(),
                layers: vec!["b1.png".to_string(), "b2.png".to_string()],
            }),
        );
        let path = dir.join("dash.yml");
        schema.write(&path).unwrap();
        path
    }

    fn args(schema: PathBuf, widget: &str, value: &str) -> ShowArgs {
        ShowArgs {
            schema,
            widget: widget.to_string(),
            value: value.to_string(),
            leading_zeros: false,
            decimals: None,
            format: OutputFormat::Json,
        }
    }

    #[test]
    fn test_show_range() {
        let dir = tempdir().unwrap();
        let path = schema_file(dir.path());
        run(args(path, "bars", "1"), &Printer::new()).unwrap();
    }

    #[test]
    fn test_show_unknown_widget() {
        let dir = tempdir().unwrap();
        let path = schema_file(dir.path());
        let err = run(args(path, "speed", "1"), &Printer::new()).unwrap_err();
        match err {
            LcdError::Value { help, .. } => {
                assert_eq!(help.as_deref(), Some("available widgets: bars"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_show_bad_value() {
        let dir = tempdir().unwrap();
        let path = schema_file(dir.path());
        assert!(run(args(path, "bars", "lots"), &Printer::new()).is_err());
    }

    #[test]
    fn test_render_text() {
        let layers = vec![
            LayerVisibility {
                layer: "a.png".to_string(),
                visible: true,
            },
            LayerVisibility {
                layer: "b.png".to_string(),
                visible: false,
            },
        ];
        assert_eq!(render_text(&layers), "on  a.png\noff b.png");
    }
}
