//! Module inference: folding text blocks into a documentation outline
//!
//! The inference pass walks a page's ordered block sequence and builds the
//! two-level outline the heading structure implies: level-2 headings open
//! modules, level-3 headings open submodules inside the current module, and
//! paragraphs accumulate onto whichever description is innermost. Level-1
//! headings carry no outline information and are ignored; levels 4 and
//! deeper degrade to continuation text of the innermost active level rather
//! than being dropped.
//!
//! Modules are scoped per page: each page contributes its own subtree tagged
//! with the source URL, and pages are merged downstream in crawl order.

use crate::extract::{BlockKind, TextBlock};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One submodule: a level-3 heading and its accumulated description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submodule {
    pub name: String,
    pub description: String,
}

/// One inferred module, keyed by a level-2 heading occurrence
///
/// `submodules` preserves discovery order and serializes as a JSON map.
/// A submodule always belongs to exactly one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub description: String,
    pub submodules: Vec<Submodule>,
    /// URL of the page this module was inferred from
    pub source_url: String,
}

impl Module {
    fn new(name: String, source_url: &str) -> Self {
        Self {
            name,
            description: String::new(),
            submodules: Vec::new(),
            source_url: source_url.to_string(),
        }
    }

    /// True when the module carries no content and should be filtered out
    fn is_empty(&self) -> bool {
        self.description.is_empty() && self.submodules.is_empty()
    }
}

// External JSON shape:
// { "module": ..., "description": ..., "submodules": { name: desc, ... },
//   "source_url": ... }
impl Serialize for Module {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("module", &self.name)?;
        map.serialize_entry("description", &self.description)?;
        map.serialize_entry("submodules", &SubmoduleMap(&self.submodules))?;
        map.serialize_entry("source_url", &self.source_url)?;
        map.end()
    }
}

/// Serializes the submodule list as a name -> description map,
/// preserving discovery order
struct SubmoduleMap<'a>(&'a [Submodule]);

impl Serialize for SubmoduleMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for sub in self.0 {
            map.serialize_entry(&sub.name, &sub.description)?;
        }
        map.end()
    }
}

/// Infers the module outline from one page's ordered block sequence
///
/// Runs the transition table over the blocks, then cleans descriptions
/// (whitespace runs collapse to single spaces) and drops modules that ended
/// up with no description and no submodules.
pub fn infer_modules(blocks: &[TextBlock], source_url: &str) -> Vec<Module> {
    let mut modules: Vec<Module> = Vec::new();
    // Index into the current module's submodules; cleared by each new module
    let mut last_submodule: Option<usize> = None;

    for block in blocks {
        match block.kind {
            BlockKind::Heading(1) => {}
            BlockKind::Heading(2) => {
                modules.push(Module::new(block.text.clone(), source_url));
                last_submodule = None;
            }
            BlockKind::Heading(3) => {
                if let Some(module) = modules.last_mut() {
                    last_submodule = Some(open_submodule(module, &block.text));
                }
                // A level-3 heading before any module is discarded
            }
            // Paragraphs and headings deeper than level 3 accumulate onto
            // the innermost active description
            BlockKind::Paragraph | BlockKind::Heading(_) => {
                if let Some(module) = modules.last_mut() {
                    accumulate(module, last_submodule, &block.text);
                }
            }
        }
    }

    for module in &mut modules {
        module.description = collapse_whitespace(&module.description);
        for sub in &mut module.submodules {
            sub.description = collapse_whitespace(&sub.description);
        }
    }

    modules.retain(|m| !m.is_empty());
    modules
}

/// Opens a submodule under `module`, returning its index
///
/// Map-insert semantics: re-encountering an existing name resets its
/// description in place instead of adding a second entry.
fn open_submodule(module: &mut Module, name: &str) -> usize {
    if let Some(pos) = module.submodules.iter().position(|s| s.name == name) {
        module.submodules[pos].description.clear();
        return pos;
    }
    module.submodules.push(Submodule {
        name: name.to_string(),
        description: String::new(),
    });
    module.submodules.len() - 1
}

/// Routes continuation text to the innermost active description
fn accumulate(module: &mut Module, last_submodule: Option<usize>, text: &str) {
    if module.description.is_empty() {
        module.description = text.to_string();
        return;
    }

    let target = match last_submodule {
        Some(idx) => &mut module.submodules[idx].description,
        None => &mut module.description,
    };

    if target.is_empty() {
        *target = text.to_string();
    } else {
        target.push(' ');
        target.push_str(text);
    }
}

/// Collapses runs of whitespace to single spaces and trims the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
