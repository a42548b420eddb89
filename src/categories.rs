/// A topical category and the channel names used to seed its playlist search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub seed_channels: &'static [&'static str],
}

const CATEGORIES: &[Category] = &[
    Category {
        name: "Inteligência Artificial",
        seed_channels: &["Canal AI", "AI News"],
    },
    Category {
        name: "Marketing Digital",
        seed_channels: &["Marketing Total", "Growth Hacker"],
    },
];

/// Read-only view over the built-in category mapping.
///
/// Iteration follows declaration order, which is also the key order of the batch export.
#[derive(Debug, Clone, Copy)]
pub struct CategoryCatalog {
    categories: &'static [Category],
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CategoryCatalog {
    #[must_use]
    pub const fn builtin() -> Self {
        Self {
            categories: CATEGORIES,
        }
    }

    #[cfg(test)]
    pub(crate) const fn from_static(categories: &'static [Category]) -> Self {
        Self { categories }
    }

    /// Looks up a category by its exact (case-sensitive) name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'static Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Category> {
        self.categories.iter()
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(|c| c.name).collect()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
