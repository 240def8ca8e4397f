//! Queries that end in a quickfix list or a jump

use super::RtagsPlugin;
use crate::error::Result;
use crate::host::EditorHost;
use crate::model::class_hierarchy::{class_locations, parse_class_hierarchy, ClassHierarchy};
use crate::model::location::{parse_location_listing, Location};
use crate::services::rc::RcRunner;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SymbolWithParent {
    parent: Option<ParentSymbol>,
}

#[derive(Debug, Deserialize)]
struct ParentSymbol {
    location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HierarchyDirection {
    Subclasses,
    Superclasses,
}

impl<R: RcRunner> RtagsPlugin<R> {
    /// List references to the symbol under the cursor
    pub fn find_references(&self, host: &mut dyn EditorHost) -> Result<()> {
        let location = self.current_location(host);
        let args = self.location_args(&["-r", &location, "-e", "--json"]);
        self.show_listing(host, &args)
    }

    /// Prompt for a symbol name and list all its references
    pub fn find_references_by_name(&self, host: &mut dyn EditorHost) -> Result<()> {
        let name = host.input("Symbol: ")?;
        let name = name.trim();
        if name.is_empty() {
            return Ok(());
        }
        let args = self.location_args(&["-a", "-R", name, "-e", "--json"]);
        self.show_listing(host, &args)
    }

    /// List overriding implementations of the virtual method under the cursor
    pub fn find_virtuals(&self, host: &mut dyn EditorHost) -> Result<()> {
        let location = self.current_location(host);
        let args = self.location_args(&["-r", &location, "-k", "--json"]);
        self.show_listing(host, &args)
    }

    fn show_listing(&self, host: &mut dyn EditorHost, args: &[String]) -> Result<()> {
        let stdout = self.runner.run_checked(args, None)?;
        let locations = parse_location_listing(&stdout)?;
        self.show_locations(host, &locations)
    }

    /// Jump to the definition/declaration of the symbol under the cursor
    pub fn follow_location(&self, host: &mut dyn EditorHost) -> Result<()> {
        let location = self.current_location(host);
        let args = self.location_args(&["-f", &location]);
        let stdout = self.runner.run_checked(&args, None)?;
        if stdout.trim().is_empty() {
            tracing::debug!("No target for {}", location);
            return Ok(());
        }
        let target = Location::parse_position(&stdout)?;
        self.jump_to_location(host, &target)
    }

    /// Jump to the scope enclosing the cursor (the class of a method, ...)
    pub fn jump_to_parent(&self, host: &mut dyn EditorHost) -> Result<()> {
        let location = self.current_location(host);
        let args = self.location_args(&[
            "-U",
            &location,
            "--symbol-info-include-parents",
            "--json",
        ]);
        let stdout = self.runner.run_checked(&args, None)?;
        let symbol: SymbolWithParent = serde_json::from_str(&stdout)?;
        match symbol.parent {
            Some(parent) => {
                let target = Location::parse_position(&parent.location)?;
                self.jump_to_location(host, &target)
            }
            None => Ok(()),
        }
    }

    pub fn find_subclasses(&self, host: &mut dyn EditorHost) -> Result<()> {
        self.show_classes(host, HierarchyDirection::Subclasses)
    }

    pub fn find_superclasses(&self, host: &mut dyn EditorHost) -> Result<()> {
        self.show_classes(host, HierarchyDirection::Superclasses)
    }

    /// Class hierarchy at the cursor. A failed query yields empty lists.
    pub fn class_hierarchy(&self, host: &dyn EditorHost) -> Result<ClassHierarchy> {
        let location = self.current_location(host);
        let args = self.location_args(&["--class-hierarchy", &location]);
        let output = self.runner.run(&args, None)?;
        if !output.success() {
            tracing::debug!(
                "Class hierarchy query failed with status {}: {}",
                output.status,
                output.stderr.trim()
            );
            return Ok(ClassHierarchy::default());
        }
        Ok(parse_class_hierarchy(&output.stdout))
    }

    fn show_classes(&self, host: &mut dyn EditorHost, direction: HierarchyDirection) -> Result<()> {
        let hierarchy = self.class_hierarchy(host)?;
        let lines = match direction {
            HierarchyDirection::Subclasses => &hierarchy.subclasses,
            HierarchyDirection::Superclasses => &hierarchy.superclasses,
        };
        let locations = class_locations(lines)?;
        self.show_locations(host, &locations)
    }
}
