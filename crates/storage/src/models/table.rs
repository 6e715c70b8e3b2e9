use std::fmt;

/// The four catalog tables written by an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogTable {
    Venues,
    Musicals,
    Productions,
    Performances,
}

impl CatalogTable {
    /// Dependents first, so no row is deleted while another still references it.
    pub const DELETE_ORDER: [CatalogTable; 4] = [
        CatalogTable::Performances,
        CatalogTable::Productions,
        CatalogTable::Musicals,
        CatalogTable::Venues,
    ];

    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Venues => "venues",
            Self::Musicals => "musicals",
            Self::Productions => "productions",
            Self::Performances => "performances",
        }
    }

    pub fn id_column(&self) -> &'static str {
        match self {
            Self::Venues => "venue_id",
            Self::Musicals => "musical_id",
            Self::Productions => "production_id",
            Self::Performances => "performance_id",
        }
    }

    /// Singular entity name used in error messages.
    pub fn entity_name(&self) -> &'static str {
        match self {
            Self::Venues => "venue",
            Self::Musicals => "musical",
            Self::Productions => "production",
            Self::Performances => "performance",
        }
    }
}

impl fmt::Display for CatalogTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}
