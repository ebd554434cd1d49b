use futures::executor::block_on;
use showroom_core::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Application state management
/// Owns the engine shared with the catalog load and the active presentation
#[derive(Debug)]
pub struct AppState {
    /// Browsing engine; shared weakly with in-flight catalog loads
    pub engine: Rc<RefCell<InventoryEngine>>,
    /// Path to the current catalog file
    pub catalog_file: Option<PathBuf>,
    /// Compact layouts batch edits in a draft
    pub presentation: Presentation,
}

impl AppState {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            engine: Rc::new(RefCell::new(InventoryEngine::new(config)?)),
            catalog_file: None,
            presentation: Presentation::Spacious,
        })
    }

    /// Load a catalog file into the engine
    pub fn load_from_file(&mut self, path: PathBuf) -> LoadOutcome {
        let provider = FileCatalogProvider::new(&path);
        let outcome = block_on(load_into(Rc::downgrade(&self.engine), &provider));

        if matches!(outcome, LoadOutcome::Applied { .. }) {
            self.catalog_file = Some(path);
        }
        outcome
    }

    /// Switch between compact and spacious presentation
    pub fn set_presentation(&mut self, presentation: Presentation) {
        self.presentation = presentation;
        self.engine.borrow_mut().set_presentation(presentation);
    }

    pub fn is_compact(&self) -> bool {
        self.presentation == Presentation::Compact
    }

    /// Catalog file name for headings
    pub fn get_catalog_title(&self) -> String {
        let file_name = self
            .catalog_file
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("Untitled");

        format!("Showroom - {}", file_name)
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        // loads still holding a weak handle must not apply after this point
        if let Ok(mut engine) = self.engine.try_borrow_mut() {
            engine.teardown();
        }
    }
}
