use std::cell::RefCell;
use std::time::Instant;

use qrgrid_core::ops::ingest::Record;
use qrgrid_core::{
    Artifact, ArtifactGenerator, ArtifactId, ArtifactMap, CellValue, GenerationOutcome,
    GenerationRequest, Row, RowId, TableConfig, TableState,
};

/// Row with the default `content` and `label` columns
#[allow(dead_code)]
pub fn row(id: &str, content: &str, label: &str) -> Row {
    Row::from_pairs(RowId::from(id), [("content", content), ("label", label)])
}

/// Table over `(id, content, label)` triples with the default configuration
#[allow(dead_code)]
pub fn table(rows: &[(&str, &str, &str)]) -> TableState {
    table_with(TableConfig::default(), rows)
}

#[allow(dead_code)]
pub fn table_with(config: TableConfig, rows: &[(&str, &str, &str)]) -> TableState {
    TableState::with_rows(
        config,
        rows.iter()
            .map(|(id, content, label)| row(id, content, label))
            .collect(),
    )
    .expect("test rows should be valid")
}

/// Ids of the visible rows, in order
#[allow(dead_code)]
pub fn visible_ids(state: &TableState) -> Vec<String> {
    state
        .projection()
        .iter()
        .map(|r| r.id().to_string())
        .collect()
}

/// Content column of every canonical row, in order
#[allow(dead_code)]
pub fn contents(state: &TableState) -> Vec<String> {
    state.rows().iter().map(|r| r.text("content")).collect()
}

/// Type a search term and let the quiet period pass
#[allow(dead_code)]
pub fn search_settled(state: &mut TableState, term: &str) {
    let now = Instant::now();
    state.set_search_term(term, now);
    let settled = now + state.config().debounce_delay();
    state.poll_search(settled);
}

/// Spreadsheet record from `(column, text)` pairs
#[allow(dead_code)]
pub fn record(pairs: &[(&str, &str)]) -> Record {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), CellValue::from(*v)))
        .collect()
}

/// Generator that renders one image per item, ids `img-000`, `img-001`, ...
///
/// Optionally adds a bulk PDF and records every request it sees.
#[allow(dead_code)]
#[derive(Default)]
pub struct FakeGenerator {
    pub with_pdf: bool,
    pub requests: RefCell<Vec<GenerationRequest>>,
}

impl FakeGenerator {
    #[allow(dead_code)]
    pub fn with_pdf() -> Self {
        Self {
            with_pdf: true,
            ..Self::default()
        }
    }
}

impl ArtifactGenerator for FakeGenerator {
    fn generate(&self, request: &GenerationRequest) -> GenerationOutcome {
        self.requests.borrow_mut().push(request.clone());
        let mut map: ArtifactMap = request
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                (
                    ArtifactId::from(format!("img-{i:03}").as_str()),
                    Artifact::image(item.clone(), "data:image/png;base64,aGk=")
                        .with_file_path(format!("out/img-{i:03}.png")),
                )
            })
            .collect();
        if self.with_pdf {
            map.insert(
                ArtifactId::from("pdf"),
                Artifact::pdf("batch", "data:application/pdf;base64,aGk=")
                    .with_file_path("out\\qrcodes.pdf"),
            );
        }
        GenerationOutcome::Success(map)
    }
}

/// Generator that always fails with `message`
#[allow(dead_code)]
pub struct FailingGenerator(pub &'static str);

impl ArtifactGenerator for FailingGenerator {
    fn generate(&self, _request: &GenerationRequest) -> GenerationOutcome {
        GenerationOutcome::failure(self.0)
    }
}
