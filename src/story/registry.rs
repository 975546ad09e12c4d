use std::collections::BTreeMap;

use crate::{
    foundation::color::Color,
    foundation::error::{StoryError, StoryResult},
};

/// Body plan used when drawing a character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPlan {
    /// Standard humanoid: kurta/tunic body, arms and legs tinted with the accent color.
    #[default]
    Standard,
    /// Elder humanoid: larger head, glasses, grey bun, draped saree.
    Elder,
}

/// Display attributes for one character.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CharacterDefinition {
    /// Registry key referenced by placements.
    pub id: String,
    /// Name shown on the label under the character.
    pub name: String,
    /// Accent (clothing) color.
    pub color: Color,
    /// Which body to draw.
    #[serde(default)]
    pub body: BodyPlan,
    /// Age in years.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Default outfit name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outfit: Option<String>,
}

/// Read-only lookup from character id to its definition.
#[derive(Clone, Debug, Default)]
pub struct CharacterRegistry {
    by_id: BTreeMap<String, CharacterDefinition>,
}

impl CharacterRegistry {
    /// Build from a cast list, rejecting empty or duplicate ids.
    pub fn from_cast(cast: &[CharacterDefinition]) -> StoryResult<Self> {
        let mut by_id = BTreeMap::new();
        for (i, def) in cast.iter().enumerate() {
            if def.id.trim().is_empty() {
                return Err(StoryError::configuration(format!(
                    "cast[{i}]: character id must be non-empty"
                )));
            }
            if by_id.insert(def.id.clone(), def.clone()).is_some() {
                return Err(StoryError::configuration(format!(
                    "cast[{i}]: duplicate character id '{}'",
                    def.id
                )));
            }
        }
        Ok(Self { by_id })
    }

    /// Look a character up by id.
    pub fn lookup(&self, id: &str) -> StoryResult<&CharacterDefinition> {
        self.by_id
            .get(id)
            .ok_or_else(|| StoryError::unknown_character(id))
    }

    /// Number of registered characters.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// `true` when no character is registered.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Presets offered by the authoring tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharacterTemplate {
    /// Boy in an orange kurta.
    Boy,
    /// Girl in pink.
    Girl,
    /// Grandmother (elder body plan).
    Grandmother,
    /// Mother in red.
    Mother,
    /// Father in blue.
    Father,
    /// Friend in green.
    Friend,
}

impl CharacterTemplate {
    /// All templates in menu order.
    pub const ALL: [CharacterTemplate; 6] = [
        CharacterTemplate::Boy,
        CharacterTemplate::Girl,
        CharacterTemplate::Grandmother,
        CharacterTemplate::Mother,
        CharacterTemplate::Father,
        CharacterTemplate::Friend,
    ];

    /// Menu key.
    pub fn key(self) -> &'static str {
        match self {
            Self::Boy => "boy",
            Self::Girl => "girl",
            Self::Grandmother => "grandmother",
            Self::Mother => "mother",
            Self::Father => "father",
            Self::Friend => "friend",
        }
    }

    /// Parse a menu key (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|t| t.key().eq_ignore_ascii_case(s))
    }

    /// Accent color.
    pub fn color(self) -> Color {
        match self {
            Self::Boy => Color::rgb(0xFF, 0x6B, 0x35),
            Self::Girl => Color::rgb(0xE9, 0x1E, 0x63),
            Self::Grandmother => Color::rgb(0x9B, 0x59, 0xB6),
            Self::Mother => Color::rgb(0xE7, 0x4C, 0x3C),
            Self::Father => Color::rgb(0x34, 0x98, 0xDB),
            Self::Friend => Color::rgb(0x2E, 0xCC, 0x71),
        }
    }

    /// Body plan.
    pub fn body(self) -> BodyPlan {
        match self {
            Self::Grandmother => BodyPlan::Elder,
            _ => BodyPlan::Standard,
        }
    }

    /// Instantiate a definition named `name`; the id is derived with [`character_id_for`].
    pub fn instantiate(self, name: &str) -> CharacterDefinition {
        CharacterDefinition {
            id: character_id_for(name),
            name: name.trim().to_owned(),
            color: self.color(),
            body: self.body(),
            age: None,
            description: Some("Character in the story".to_owned()),
            outfit: Some("traditional".to_owned()),
        }
    }
}

/// Lowercase the name and replace each whitespace character with `_`.
pub fn character_id_for(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/story/registry.rs"]
mod tests;
