//! Specialty catalog: static lookup and search data for the focus-area steps.
//!
//! The table is read-only for the lifetime of the process. Search is a plain
//! case-insensitive substring match; results keep declaration order.

pub mod data;

use serde::Serialize;

/// Maximum number of results returned by [`SpecialtyCatalog::search`].
pub const SEARCH_LIMIT: usize = 8;

/// Maximum number of curated chips returned by [`SpecialtyCatalog::top_chips`].
pub const TOP_CHIP_LIMIT: usize = 10;

/// Role whose shortlist is used when a role has none of its own.
pub const FALLBACK_CHIP_ROLE: &str = "MD / DO";

/// A catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Specialty {
    pub id: &'static str,
    pub name: &'static str,
    pub synonyms: &'static [&'static str],
    /// Role labels this specialty applies to.
    pub roles: &'static [&'static str],
    /// Administrative browsing category, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'static str>,
}

impl Specialty {
    /// Whether `needle` (already lowercased) occurs in the name or any synonym.
    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .synonyms
                .iter()
                .any(|syn| syn.to_lowercase().contains(needle))
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| *r == role)
    }
}

/// What a search is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFilter<'a> {
    /// Clinical search: records whose roles include this label.
    Role(&'a str),
    /// Administrative browsing: records in this category.
    Category(&'a str),
}

impl SearchFilter<'_> {
    fn admits(&self, specialty: &Specialty) -> bool {
        match self {
            Self::Role(role) => specialty.has_role(role),
            Self::Category(category) => specialty.category.is_some_and(|c| c == *category),
        }
    }
}

/// Read-only specialty index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialtyCatalog {
    specialties: &'static [Specialty],
    top_chips: &'static [(&'static str, &'static [&'static str])],
}

impl Default for SpecialtyCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SpecialtyCatalog {
    /// Build a catalog over an arbitrary static table.
    pub const fn new(
        specialties: &'static [Specialty],
        top_chips: &'static [(&'static str, &'static [&'static str])],
    ) -> Self {
        Self {
            specialties,
            top_chips,
        }
    }

    /// The built-in catalog.
    pub const fn builtin() -> Self {
        Self::new(data::SPECIALTIES, data::ROLE_TOP_CHIPS)
    }

    /// All records in declaration order.
    pub fn specialties(&self) -> &'static [Specialty] {
        self.specialties
    }

    pub fn get(&self, id: &str) -> Option<&'static Specialty> {
        self.specialties.iter().find(|s| s.id == id)
    }

    /// Exact (case-sensitive) lookup by display name.
    pub fn find_by_name(&self, name: &str) -> Option<&'static Specialty> {
        self.specialties.iter().find(|s| s.name == name)
    }

    /// Search by name or synonym, scoped by role or category.
    ///
    /// An empty (or blank) query or a missing filter yields no results.
    pub fn search(&self, query: &str, filter: Option<SearchFilter<'_>>) -> Vec<&'static Specialty> {
        let needle = query.trim().to_lowercase();
        let Some(filter) = filter else {
            return Vec::new();
        };
        if needle.is_empty() {
            return Vec::new();
        }

        self.specialties
            .iter()
            .filter(|s| filter.admits(s) && s.matches(&needle))
            .take(SEARCH_LIMIT)
            .collect()
    }

    /// Curated shortlist for a role, falling back to [`FALLBACK_CHIP_ROLE`].
    pub fn top_chips(&self, role: Option<&str>) -> Vec<&'static str> {
        let chips = role
            .and_then(|r| self.chips_for(r))
            .or_else(|| self.chips_for(FALLBACK_CHIP_ROLE))
            .unwrap_or(&[]);
        chips.iter().copied().take(TOP_CHIP_LIMIT).collect()
    }

    fn chips_for(&self, role: &str) -> Option<&'static [&'static str]> {
        self.top_chips
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, chips)| *chips)
    }

    /// Every record in an administrative category, in declaration order.
    pub fn by_category(&self, category: &str) -> Vec<&'static Specialty> {
        self.specialties
            .iter()
            .filter(|s| s.category.is_some_and(|c| c == category))
            .collect()
    }

    /// Whether `name` is a selectable focus area for `role`: either one of
    /// the role's chips or a catalog record carrying the role.
    pub fn offers(&self, role: &str, name: &str) -> bool {
        self.top_chips(Some(role)).iter().any(|chip| *chip == name)
            || self
                .specialties
                .iter()
                .any(|s| s.name == name && s.has_role(role))
    }
}
