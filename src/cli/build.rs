//! Build command implementation.
//!
//! Extracts each discovered document and writes `<out>/<stem>/<stem>.yml`.
//! For layer folders the leaf PNGs are copied next to the schema under
//! their layer file names.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::document::{document_stem, load_document};
use crate::error::{LcdError, Result};
use crate::extract::{extract, Extraction};
use crate::output::{display_path, plural, Printer};
use crate::validation::{print_diagnostics, validate_extraction};

/// Extract widget schemas and layer images from documents
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Documents or directories to build (default: current project)
    pub paths: Vec<PathBuf>,

    /// Output directory (overrides the manifest)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let discovery = super::discover_documents(&args.paths)?;
    let output = discovery.output_dir(args.output.as_deref());

    if discovery.scan.is_empty() {
        printer.warning("Warning", "no documents found");
        return Ok(());
    }

    let mut built = 0;
    let mut failed = Vec::new();

    for path in discovery.scan.paths() {
        let document = load_document(path)?;
        printer.status(
            "Extracting",
            &format!(
                "{} ({})",
                display_path(path),
                plural(document.node_count(), "layer", "layers")
            ),
        );

        let extraction = extract(&document);
        let result = validate_extraction(&extraction);
        print_diagnostics(&result, printer);

        if result.has_errors() {
            failed.push(display_path(path));
            continue;
        }

        let stem = document_stem(path);
        let schema_path = write_outputs(&extraction, &output.join(&stem), &stem)?;
        printer.info(
            "Wrote",
            &format!(
                "{} ({}, {})",
                display_path(&schema_path),
                plural(extraction.schema.widgets.len(), "widget", "widgets"),
                plural(extraction.records.len(), "layer", "layers")
            ),
        );
        built += 1;
    }

    if !failed.is_empty() {
        return Err(LcdError::Build {
            message: format!("validation failed for {}", failed.join(", ")),
            help: Some("Run `lcdc validate` for details".to_string()),
        });
    }

    printer.success(
        "Finished",
        &format!(
            "{} to {}",
            plural(built, "document", "documents"),
            display_path(&output)
        ),
    );
    Ok(())
}

/// Write the schema and copy layer images into `dir`. Returns the schema path.
fn write_outputs(extraction: &Extraction, dir: &Path, stem: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| LcdError::Io {
        path: dir.to_path_buf(),
        message: format!("Failed to create output directory: {}", e),
    })?;

    for record in &extraction.records {
        let Some(source) = &record.source else {
            continue;
        };
        let target = dir.join(record.filename());
        fs::copy(source, &target).map_err(|e| LcdError::Io {
            path: source.clone(),
            message: format!("Failed to copy layer image: {}", e),
        })?;
    }

    let schema_path = dir.join(format!("{}.yml", stem));
    extraction.schema.write(&schema_path)?;
    Ok(schema_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use crate::widget::WidgetDescriptor;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    fn write_png(path: &Path, opaque: &[(u32, u32)]) {
        let mut img = RgbaImage::new(8, 8);
        for &(x, y) in opaque {
            img.put_pixel(x, y, Rgba([255, 255, 255, 255]));
        }
        img.save(path).unwrap();
    }

    #[test]
    fn test_build_layer_tree() {
        let dir = tempdir().unwrap();
        let doc = dir.path().join("dash.layers.yaml");
        let output = dir.path().join("out");
        fs::write(
            &doc,
            r#"
source_file: dash.psb
width: 64
height: 32
layers:
  - name: "[R]signal"
    children:
      - { name: bar3, bbox: [20, 0, 24, 12] }
      - { name: bar2, bbox: [10, 4, 14, 12] }
      - { name: bar1, bbox: [0, 8, 4, 12] }
"#,
        )
        .unwrap();

        let args = BuildArgs {
            paths: vec![doc],
            output: Some(output.clone()),
        };
        run(args, &Printer::new()).unwrap();

        let schema = Schema::load(&output.join("dash/dash.yml")).unwrap();
        assert_eq!(schema.source_file, "dash.psb");
        assert_eq!(schema.layers.len(), 3);
        let Some(WidgetDescriptor::Range(signal)) = schema.widget("signal") else {
            panic!("signal should be a range widget");
        };
        assert_eq!(signal.layers[0], "signal--bar3.png");
    }

    #[test]
    fn test_build_layer_folder_copies_images() {
        let dir = tempdir().unwrap();
        let doc = dir.path().join("panel.layers");
        let output = dir.path().join("out");
        fs::create_dir_all(doc.join("[T]alarm")).unwrap();
        write_png(&doc.join("[T]alarm/bell.png"), &[(1, 1), (2, 3)]);
        write_png(&doc.join("blank.png"), &[]);

        let args = BuildArgs {
            paths: vec![doc],
            output: Some(output.clone()),
        };
        run(args, &Printer::new()).unwrap();

        let out = output.join("panel");
        assert!(out.join("panel.yml").exists());
        assert!(out.join("alarm--bell.png").exists());
        assert!(!out.join("blank.png").exists());

        let schema = Schema::load(&out.join("panel.yml")).unwrap();
        assert_eq!(schema.layers[0].x, 1);
        assert_eq!(schema.layers[0].width, 2);
        assert_eq!(schema.layers[0].height, 3);
    }

    #[test]
    fn test_build_fails_on_validation_errors() {
        let dir = tempdir().unwrap();
        let doc = dir.path().join("dup.layers.yaml");
        let output = dir.path().join("out");
        fs::write(
            &doc,
            "layers:\n  - { name: a, bbox: [0, 0, 1, 1] }\n  - { name: a, bbox: [0, 0, 1, 1] }\n",
        )
        .unwrap();

        let args = BuildArgs {
            paths: vec![doc],
            output: Some(output.clone()),
        };
        assert!(matches!(
            run(args, &Printer::new()),
            Err(LcdError::Build { .. })
        ));
        assert!(!output.join("dup/dup.yml").exists());
    }
}
