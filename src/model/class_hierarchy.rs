//! Parsing of `rc --class-hierarchy` output
//!
//! rc prints the hierarchy as plain text in two sections:
//!
//! ```text
//! Superclasses:
//!   class Base	/src/base.h:4:7:	class Base {
//! Subclasses:
//!   class Derived	/src/derived.h:6:7:	class Derived : public Base {
//! ```
//!
//! Lines before any header are treated as subclasses. It is unclear whether rc
//! ever emits such lines, so the behavior is kept as is.

use crate::error::MalformedOutput;
use crate::model::location::Location;

const SUPERCLASSES_HEADER: &str = "Superclasses:";
const SUBCLASSES_HEADER: &str = "Subclasses:";

/// Both sections of a class hierarchy listing, one raw entry per line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassHierarchy {
    pub superclasses: Vec<String>,
    pub subclasses: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Superclasses,
    Subclasses,
}

/// Split a class hierarchy listing into its two sections.
///
/// Empty input yields empty lists.
pub fn parse_class_hierarchy(text: &str) -> ClassHierarchy {
    let mut hierarchy = ClassHierarchy::default();
    let text = text.trim();
    if text.is_empty() {
        return hierarchy;
    }

    let mut section = Section::Subclasses;
    for line in text.lines().map(str::trim) {
        match line {
            SUPERCLASSES_HEADER => section = Section::Superclasses,
            SUBCLASSES_HEADER => section = Section::Subclasses,
            entry => match section {
                Section::Superclasses => hierarchy.superclasses.push(entry.to_string()),
                Section::Subclasses => hierarchy.subclasses.push(entry.to_string()),
            },
        }
    }

    hierarchy
}

/// One `name<TAB>location<TAB>context` line of the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassEntry {
    pub name: String,
    pub location: String,
    pub context: String,
}

impl ClassEntry {
    pub fn parse(line: &str) -> Result<Self, MalformedOutput> {
        let fields: Vec<&str> = line.split('\t').collect();
        let [name, location, context] = fields.as_slice() else {
            return Err(MalformedOutput::MalformedRecord {
                record: line.to_string(),
                separator: '\t',
                expected: 3,
                found: fields.len(),
            });
        };

        Ok(Self {
            name: name.to_string(),
            location: location.to_string(),
            context: context.to_string(),
        })
    }

    /// Location of the class declaration, with the declaration line as its text
    pub fn to_location(&self) -> Result<Location, MalformedOutput> {
        let mut location = Location::parse_position(&self.location)?;
        location.text = self.context.clone();
        Ok(location)
    }
}

/// Turn raw hierarchy lines into quickfix-ready locations.
pub fn class_locations(lines: &[String]) -> Result<Vec<Location>, MalformedOutput> {
    lines
        .iter()
        .map(|line| ClassEntry::parse(line)?.to_location())
        .collect()
}
