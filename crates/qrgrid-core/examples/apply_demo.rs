//! Apply API Demonstration
//!
//! Drives a table through the `apply()` entry point the way a UI host would:
//! 1. Paste rows from a spreadsheet
//! 2. Debounced search and keyboard navigation
//! 3. Generation through a stand-in artifact service
//! 4. Edit invalidation and undo
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::{Duration, Instant};

use qrgrid_core::logging_facility::{init, Profile};
use qrgrid_core::{
    apply, Artifact, ArtifactGenerator, ArtifactId, ArtifactMap, GenerationOutcome,
    GenerationRequest, Intent, TableConfig, TableState,
};

/// Renders every item as a tiny fake PNG
struct StubService;

impl ArtifactGenerator for StubService {
    fn generate(&self, request: &GenerationRequest) -> GenerationOutcome {
        let artifacts: ArtifactMap = request
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                (
                    ArtifactId::from(format!("{}-{i}", request.request_id).as_str()),
                    Artifact::image(item.clone(), "data:image/png;base64,iVBORw0KGgo=")
                        .with_file_path(format!("static/qrcodes/{i}.png")),
                )
            })
            .collect();
        GenerationOutcome::Success(artifacts)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init(Profile::Development);
    println!("=== qrgrid Apply API Demo ===\n");

    // ===== Part 1: Paste =====
    let mut state = TableState::new(TableConfig::default())?;
    let pasted = "https://example.com/a\tAlpha\nhttps://example.com/b\tBeta\nftp://legacy\tGamma";
    apply(&mut state, Intent::Paste(pasted.to_string()))?;
    println!("Pasted {} rows", state.rows().len());

    // ===== Part 2: Search and navigation =====
    let t0 = Instant::now();
    apply(
        &mut state,
        Intent::SearchChanged {
            term: "https".to_string(),
            at: t0,
        },
    )?;
    let settled = apply(
        &mut state,
        Intent::SearchTick {
            at: t0 + Duration::from_millis(1000),
        },
    )?;
    println!(
        "Search settled: {settled}, {} rows visible",
        state.projection().len()
    );

    let first = state.projection()[0].id().clone();
    apply(&mut state, Intent::RowClicked(first))?;
    apply(&mut state, Intent::KeyPressed("ArrowDown".to_string()))?;
    println!("Selected: {:?}\n", state.selection());

    // ===== Part 3: Generation =====
    let count = state.generate_with(&StubService)?;
    apply(&mut state, Intent::RefreshPreview)?;
    println!("Generated {count} artifacts");
    if let Some((id, artifact)) = state.preview() {
        println!("Preview {id}: {}", artifact.generation_text);
    }

    // ===== Part 4: Edit and undo =====
    let selected = state.selection().row_id().cloned().expect("row selected");
    apply(
        &mut state,
        Intent::CellEdited {
            row_id: selected,
            field: "label".to_string(),
            value: "Beta v2".to_string(),
        },
    )?;
    println!(
        "\nAfter edit: {} artifacts left, preview bound: {}",
        state.artifacts().len(),
        state.preview().is_some()
    );

    apply(&mut state, Intent::Undo)?;
    println!(
        "After undo: can_undo={}, can_redo={}",
        state.can_undo(),
        state.can_redo()
    );

    apply(&mut state, Intent::Dispose)?;
    Ok(())
}
