//! Category definitions

use serde::{Deserialize, Serialize};

/// Fixed set of pose categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Women solo poses
    WomenSolo,
    /// Men solo poses
    MenSolo,
    /// Couples poses
    Couples,
    /// Kids and family poses
    KidsFamily,
    /// Group and friends poses
    GroupFriends,
    /// Dogs
    PetsDogs,
    /// Cats
    PetsCats,
    /// Owner with pet
    OwnerPet,
    /// Professional and portrait poses
    ProfessionalPortrait,
    /// Creative and themed poses
    CreativeThemed,
}

impl Category {
    /// Get all categories in display order
    pub const fn all() -> &'static [Self] {
        &[
            Self::WomenSolo,
            Self::MenSolo,
            Self::Couples,
            Self::KidsFamily,
            Self::GroupFriends,
            Self::PetsDogs,
            Self::PetsCats,
            Self::OwnerPet,
            Self::ProfessionalPortrait,
            Self::CreativeThemed,
        ]
    }

    /// Identifier used by the remote `poses` table
    pub const fn id(&self) -> &'static str {
        match self {
            Self::WomenSolo => "women-solo",
            Self::MenSolo => "men-solo",
            Self::Couples => "couples",
            Self::KidsFamily => "kids-family",
            Self::GroupFriends => "group-friends",
            Self::PetsDogs => "pets-dogs",
            Self::PetsCats => "pets-cats",
            Self::OwnerPet => "owner-pet",
            Self::ProfessionalPortrait => "professional-portrait",
            Self::CreativeThemed => "creative-themed",
        }
    }

    /// Get the display name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::WomenSolo => "Women Solo Poses",
            Self::MenSolo => "Men Solo Poses",
            Self::Couples => "Couples Poses",
            Self::KidsFamily => "Kids & Family Poses",
            Self::GroupFriends => "Group & Friends Poses",
            Self::PetsDogs => "Pets – Dogs",
            Self::PetsCats => "Pets – Cats",
            Self::OwnerPet => "Owner & Pet Poses",
            Self::ProfessionalPortrait => "Professional & Portrait Poses",
            Self::CreativeThemed => "Creative & Themed Poses",
        }
    }

    /// Cover image for the category grid
    pub const fn image_url(&self) -> &'static str {
        match self {
            Self::WomenSolo => "https://images.pexels.com/photos/3785079/pexels-photo-3785079.jpeg",
            Self::MenSolo | Self::ProfessionalPortrait => {
                "https://images.pexels.com/photos/3785104/pexels-photo-3785104.jpeg"
            }
            Self::Couples | Self::GroupFriends | Self::CreativeThemed => {
                "https://images.pexels.com/photos/1024993/pexels-photo-1024993.jpeg"
            }
            Self::KidsFamily => "https://images.pexels.com/photos/1416736/pexels-photo-1416736.jpeg",
            Self::PetsDogs | Self::OwnerPet => {
                "https://images.pexels.com/photos/1108099/pexels-photo-1108099.jpeg"
            }
            Self::PetsCats => "https://images.pexels.com/photos/2558605/pexels-photo-2558605.jpeg",
        }
    }

    /// Parse from a category id
    pub fn from_id(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::all().iter().copied().find(|c| c.id() == s)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A category together with how many poses it currently holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySummary {
    /// The category
    pub category: Category,
    /// Number of poses (0 when the count could not be fetched)
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for category in Category::all() {
            assert_eq!(Category::from_id(category.id()), Some(*category));
        }
        assert_eq!(Category::all().len(), 10);
    }

    #[test]
    fn test_from_id_unknown() {
        assert_eq!(Category::from_id("landscapes"), None);
        assert_eq!(Category::from_id(" Couples "), Some(Category::Couples));
    }

    #[test]
    fn test_serde_uses_ids() {
        let json = serde_json::to_string(&Category::PetsCats).unwrap();
        assert_eq!(json, "\"pets-cats\"");
    }
}
