//! Non-fatal findings from a resolution pass.

use std::fmt;

use slsdep_core::product::{ProductDependency, ProductId};

/// Advisory notes collected while resolving. None of these fail a build.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResolutionReport {
    pub notes: Vec<ResolutionNote>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionNote {
    /// The declaration adds nothing over what discovery alone produces.
    RedundantDeclaration {
        declared: ProductDependency,
        discovered: ProductDependency,
    },
    /// A product marked optional was never recommended by any dependency.
    UnusedOptional { product_id: ProductId },
}

impl ResolutionReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, note: ResolutionNote) {
        self.notes.push(note);
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn redundant(&self) -> impl Iterator<Item = &ProductDependency> {
        self.notes.iter().filter_map(|n| match n {
            ResolutionNote::RedundantDeclaration { declared, .. } => Some(declared),
            ResolutionNote::UnusedOptional { .. } => None,
        })
    }
}

impl fmt::Display for ResolutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.notes.is_empty() {
            return write!(f, "No suggestions.");
        }
        writeln!(f, "Suggestions ({}):", self.notes.len())?;
        for note in &self.notes {
            writeln!(f, "  {note}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ResolutionNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionNote::RedundantDeclaration {
                declared,
                discovered,
            } => write!(
                f,
                "{}: declaration {declared} can be removed, discovered dependencies already require {discovered}",
                declared.id()
            ),
            ResolutionNote::UnusedOptional { product_id } => write!(
                f,
                "{product_id}: marked optional but not recommended by any dependency"
            ),
        }
    }
}
