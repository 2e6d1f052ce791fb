//! The entity index pane: the package tree on the left of the browser.
//!
//! The index supports three controls, each running in its own scheduler
//! phase: focusing on one package's subtree (`focus`), switching between
//! packages-only and all-entities display (`kind`), and free-text filtering
//! of template names (`filter`). A pristine copy of the top level is kept so
//! unfocusing restores it exactly.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

use crate::domain::Kind;
use crate::error::{DocsiftError, Result};
use crate::filter::TextQuery;
use crate::scheduler::{LABEL_FILTER, LABEL_FOCUS, LABEL_KIND, Scheduler};

/// One class/trait/object entry in the index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub name: String,
    pub kind: Kind,
    pub visible: bool,
}

/// A package with its templates and subpackages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageNode {
    pub name: String,
    pub templates: Vec<TemplateEntry>,
    pub packages: Vec<PackageNode>,

    /// Heading and per-package controls shown; hidden when no template matches
    pub header_visible: bool,
    pub visible: bool,
}

impl PackageNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            templates: Vec::new(),
            packages: Vec::new(),
            header_visible: true,
            visible: true,
        }
    }

    /// Find a package by qualified name in this subtree.
    pub fn find(&self, name: &str) -> Option<&PackageNode> {
        if self.name == name {
            return Some(self);
        }
        self.packages.iter().find_map(|p| p.find(name))
    }

    fn visible_template_count(&self) -> usize {
        self.templates.iter().filter(|t| t.visible).count()
            + self.packages.iter().map(|p| p.visible_template_count()).sum::<usize>()
    }
}

/// Packages-only vs all-entities display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindMode {
    All,
    PackagesOnly,
}

/// The whole index pane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityIndex {
    pub root: PackageNode,
    pristine: PackageNode,
    focus: Option<String>,
    kind_mode: KindMode,
}

impl EntityIndex {
    /// Build an index from the parsed top level; a pristine copy is saved
    /// for unfocusing.
    pub fn new(root: PackageNode) -> Self {
        Self {
            pristine: root.clone(),
            root,
            focus: None,
            kind_mode: KindMode::All,
        }
    }

    pub fn focused(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    pub fn kind_mode(&self) -> KindMode {
        self.kind_mode
    }

    pub fn set_kind_mode(&mut self, mode: KindMode) {
        self.kind_mode = mode;
    }

    /// The kind mode actually applied: forced to All while a focus is
    /// active, since a focused subtree is always shown in full.
    pub fn effective_kind_mode(&self) -> KindMode {
        if self.focus.is_some() {
            KindMode::All
        } else {
            self.kind_mode
        }
    }

    /// Narrow the index to one package's subtree.
    pub fn focus(&mut self, name: &str) -> Result<()> {
        let target = self
            .root
            .find(name)
            .or_else(|| self.pristine.find(name))
            .cloned()
            .ok_or_else(|| DocsiftError::PackageNotFound(name.to_string()))?;

        self.root = PackageNode {
            name: String::new(),
            templates: target.templates,
            packages: target.packages,
            header_visible: true,
            visible: true,
        };
        self.focus = Some(name.to_string());
        Ok(())
    }

    /// Restore the saved top level.
    pub fn unfocus(&mut self) {
        self.root = self.pristine.clone();
        self.focus = None;
    }

    /// Re-evaluate the whole tree against a query and the effective kind
    /// mode.
    pub fn refresh(&mut self, query: &TextQuery) {
        let mode = self.effective_kind_mode();
        refresh_templates(&mut self.root.templates, query, mode);
        for package in &mut self.root.packages {
            refresh_node(package, query, mode);
        }
    }

    /// Re-evaluate one top-level package (the unit of scheduled work).
    pub fn refresh_package(&mut self, name: &str, query: &TextQuery) -> Result<()> {
        let mode = self.effective_kind_mode();
        let package = self
            .root
            .packages
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| DocsiftError::PackageNotFound(name.to_string()))?;
        refresh_node(package, query, mode);
        Ok(())
    }

    /// Re-evaluate the top-level templates outside any package.
    pub fn refresh_root_templates(&mut self, query: &TextQuery) {
        let mode = self.effective_kind_mode();
        refresh_templates(&mut self.root.templates, query, mode);
    }

    pub fn visible_template_count(&self) -> usize {
        self.root.visible_template_count()
    }
}

/// Returns how many templates match the query. Display additionally requires
/// the all-entities mode; the match count alone drives package collapsing, so
/// switching to packages-only display never hides the packages themselves.
fn refresh_templates(templates: &mut [TemplateEntry], query: &TextQuery, mode: KindMode) -> usize {
    let mut matches = 0;
    for template in templates {
        let matched = query.matches(&template.name);
        if matched {
            matches += 1;
        }
        template.visible = matched && mode == KindMode::All;
    }
    matches
}

fn refresh_node(node: &mut PackageNode, query: &TextQuery, mode: KindMode) {
    let matches = refresh_templates(&mut node.templates, query, mode);

    let mut any_child = false;
    for child in &mut node.packages {
        refresh_node(child, query, mode);
        any_child |= child.visible;
    }

    node.header_visible = node.templates.iter().any(|t| t.visible);
    node.visible = matches > 0 || any_child;
}

/// Shared handle used by scheduled tasks; the page is single-threaded and
/// cooperative, so Rc<RefCell> is the ownership model.
pub type SharedIndex = Rc<RefCell<EntityIndex>>;

/// Schedule focusing on a package: pending filter work is stale and
/// discarded, the focus itself runs in the `focus` phase and re-syncs the
/// kind display afterwards.
pub fn schedule_focus(scheduler: &mut Scheduler, index: &SharedIndex, target: &str) -> Result<()> {
    scheduler.clear(LABEL_FILTER)?;
    let index = Rc::clone(index);
    let target = target.to_string();
    scheduler.enqueue(LABEL_FOCUS, move |scheduler| {
        index.borrow_mut().focus(&target)?;
        schedule_kind_sync(scheduler, &index)
    })
}

/// Schedule removing the focus and restoring the saved top level.
pub fn schedule_unfocus(scheduler: &mut Scheduler, index: &SharedIndex) -> Result<()> {
    scheduler.clear(LABEL_FILTER)?;
    let index = Rc::clone(index);
    scheduler.enqueue(LABEL_FOCUS, move |scheduler| {
        index.borrow_mut().unfocus();
        schedule_kind_sync(scheduler, &index)
    })
}

/// Schedule a kind-display sync, one task per top-level package.
pub fn schedule_kind_sync(scheduler: &mut Scheduler, index: &SharedIndex) -> Result<()> {
    let index = Rc::clone(index);
    scheduler.enqueue(LABEL_KIND, move |scheduler| {
        index.borrow_mut().refresh_root_templates(&TextQuery::All);
        let names: Vec<String> = index.borrow().root.packages.iter().map(|p| p.name.clone()).collect();
        let index = Rc::clone(&index);
        scheduler.enqueue_for_each(LABEL_KIND, names, move |_, name| {
            index.borrow_mut().refresh_package(&name, &TextQuery::All)
        })
    })
}

/// Schedule a text-filter pass. Any previously queued filter work is stale
/// (the query has changed) and discarded first.
pub fn schedule_text_filter(scheduler: &mut Scheduler, index: &SharedIndex, raw: &str) -> Result<()> {
    scheduler.clear(LABEL_FILTER)?;
    let index = Rc::clone(index);
    let raw = raw.to_string();
    scheduler.enqueue(LABEL_FILTER, move |scheduler| {
        let query = TextQuery::compile(&raw);
        index.borrow_mut().refresh_root_templates(&query);
        let names: Vec<String> = index.borrow().root.packages.iter().map(|p| p.name.clone()).collect();
        let index = Rc::clone(&index);
        scheduler.enqueue_for_each(LABEL_FILTER, names, move |_, name| {
            index.borrow_mut().refresh_package(&name, &query)
        })
    })
}
