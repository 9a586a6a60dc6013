//! Class metadata model and the immutable per-run snapshot.
//!
//! Descriptors are produced by an external front end (source or
//! bytecode scanner) and handed to the engine fully formed. The engine
//! never mutates them; a [`CodebaseSnapshot`] is the single view of the
//! codebase shared by every rule in one evaluation run.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Static metadata for one field declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: String,
    /// Declared type, as a qualified name where the front end knows it.
    pub declared_type: String,
    /// Whether the field is final (immutable after construction).
    #[serde(default)]
    pub is_final: bool,
    /// Whether the field is static (class-level).
    #[serde(default)]
    pub is_static: bool,
    /// Whether the field is public.
    #[serde(default)]
    pub is_public: bool,
}

/// Static metadata for one method declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Method name.
    pub name: String,
    /// Parameter types in declaration order.
    #[serde(default)]
    pub parameter_types: Vec<String>,
    /// Whether the method is static.
    #[serde(default)]
    pub is_static: bool,
}

/// The static metadata record for one class, the engine's unit of
/// analysis.
///
/// `simple_name` and `package` are derived from the qualified name so
/// they can never disagree with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    /// Fully qualified class name (e.g. `com.acme.domain.model.Order`).
    pub qualified_name: String,
    /// Qualified names of annotations present on the class.
    #[serde(default)]
    pub annotations: BTreeSet<String>,
    /// Qualified names of supertypes and implemented interfaces.
    #[serde(default)]
    pub supertypes: BTreeSet<String>,
    /// Whether this type is an interface.
    #[serde(default)]
    pub is_interface: bool,
    /// Whether this type is abstract.
    #[serde(default)]
    pub is_abstract: bool,
    /// Declared fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    /// Declared methods in declaration order.
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
    /// Qualified names this class statically depends on.
    #[serde(default)]
    pub dependencies: BTreeSet<String>,
}

impl ClassDescriptor {
    /// Creates a minimal descriptor with only a qualified name.
    #[must_use]
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            annotations: BTreeSet::new(),
            supertypes: BTreeSet::new(),
            is_interface: false,
            is_abstract: false,
            fields: Vec::new(),
            methods: Vec::new(),
            dependencies: BTreeSet::new(),
        }
    }

    /// Returns the simple class name (after the last `.`).
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.qualified_name
            .rsplit_once('.')
            .map_or(self.qualified_name.as_str(), |(_, name)| name)
    }

    /// Returns the package path (before the last `.`), or `""` for a
    /// bare name.
    #[must_use]
    pub fn package(&self) -> &str {
        self.qualified_name
            .rsplit_once('.')
            .map_or("", |(pkg, _)| pkg)
    }

    /// Whether the class carries the given annotation.
    #[must_use]
    pub fn is_annotated_with(&self, annotation: &str) -> bool {
        self.annotations.contains(annotation)
    }
}

/// Errors in snapshot construction.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SnapshotError {
    /// Two descriptors share a qualified name.
    #[error("duplicate class descriptor `{name}`")]
    DuplicateClass {
        /// The duplicated qualified name.
        name: String,
    },
}

/// An immutable snapshot of the codebase under analysis.
///
/// Descriptors are stored sorted by qualified name, and the reverse
/// dependency index is computed once here rather than per rule, so
/// every rule in a run observes the same view and graph-wide conditions
/// stay cheap and deterministic.
#[derive(Debug, Clone)]
pub struct CodebaseSnapshot {
    classes: Vec<ClassDescriptor>,
    by_name: HashMap<String, usize>,
    referenced_by: HashMap<String, Vec<usize>>,
}

impl CodebaseSnapshot {
    /// Builds a snapshot from a collection of descriptors.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::DuplicateClass`] if two descriptors
    /// share a qualified name.
    pub fn new(mut classes: Vec<ClassDescriptor>) -> Result<Self, SnapshotError> {
        classes.sort_by(|a, b| a.qualified_name.cmp(&b.qualified_name));

        let mut by_name = HashMap::with_capacity(classes.len());
        for (idx, class) in classes.iter().enumerate() {
            if by_name.insert(class.qualified_name.clone(), idx).is_some() {
                return Err(SnapshotError::DuplicateClass {
                    name: class.qualified_name.clone(),
                });
            }
        }

        let mut referenced_by: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, class) in classes.iter().enumerate() {
            for dep in &class.dependencies {
                referenced_by.entry(dep.clone()).or_default().push(idx);
            }
        }
        // Referrer lists inherit the sorted class order, so iteration
        // over them is deterministic without further sorting.

        Ok(Self {
            classes,
            by_name,
            referenced_by,
        })
    }

    /// All descriptors, sorted by qualified name.
    #[must_use]
    pub fn classes(&self) -> &[ClassDescriptor] {
        &self.classes
    }

    /// Number of descriptors in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the snapshot contains no descriptors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Looks up a descriptor by qualified name.
    #[must_use]
    pub fn get(&self, qualified_name: &str) -> Option<&ClassDescriptor> {
        self.by_name
            .get(qualified_name)
            .map(|&idx| &self.classes[idx])
    }

    /// Descriptors that statically depend on the given class, in
    /// qualified-name order.
    pub fn referencers_of(&self, qualified_name: &str) -> impl Iterator<Item = &ClassDescriptor> {
        self.referenced_by
            .get(qualified_name)
            .into_iter()
            .flatten()
            .map(|&idx| &self.classes[idx])
    }

    /// Resolves the dependencies of a descriptor to descriptors present
    /// in this snapshot, skipping external names.
    pub fn resolved_dependencies_of<'a>(
        &'a self,
        class: &'a ClassDescriptor,
    ) -> impl Iterator<Item = &'a ClassDescriptor> {
        class.dependencies.iter().filter_map(|dep| self.get(dep))
    }
}
