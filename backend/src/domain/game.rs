//! Game entity: a bookable VR activity from the fixed catalogue.

use game_catalog::CatalogGame;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::EntityId;

/// A bookable VR activity.
///
/// Games are seeded once at first start from the catalogue crate and are
/// read-only afterwards; no update or delete operation exists.
///
/// Player bounds are advisory: booking creation does not check `team_size`
/// against them (preserved permissive behaviour).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Server-assigned identifier.
    pub id: EntityId,
    /// Display name.
    #[schema(example = "Zombie Apocalypse")]
    pub name: String,
    /// Short marketing description.
    pub description: String,
    /// Cover image URL.
    pub image_url: String,
    /// Smallest team the arena will host.
    pub min_players: i32,
    /// Largest team the arena will host.
    pub max_players: i32,
}

/// Insertable variant of [`Game`], used only while seeding the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewGame {
    /// Display name.
    pub name: String,
    /// Short marketing description.
    pub description: String,
    /// Cover image URL.
    pub image_url: String,
    /// Smallest team the arena will host.
    pub min_players: i32,
    /// Largest team the arena will host.
    pub max_players: i32,
}

impl NewGame {
    /// Attach a server-assigned id, producing the stored entity.
    #[must_use]
    pub fn into_game(self, id: EntityId) -> Game {
        Game {
            id,
            name: self.name,
            description: self.description,
            image_url: self.image_url,
            min_players: self.min_players,
            max_players: self.max_players,
        }
    }
}

impl From<&CatalogGame> for NewGame {
    fn from(entry: &CatalogGame) -> Self {
        Self {
            name: entry.name.to_owned(),
            description: entry.description.to_owned(),
            image_url: entry.image_url.to_owned(),
            min_players: entry.min_players,
            max_players: entry.max_players,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn first_entry() -> &'static game_catalog::CatalogGame {
        game_catalog::seed_catalog()
            .first()
            .expect("catalogue is non-empty")
    }

    #[rstest]
    fn catalogue_entries_convert_verbatim() {
        let game = NewGame::from(first_entry()).into_game(EntityId::from_i64(1));
        assert_eq!(game.name, "Zombie Apocalypse");
        assert_eq!(game.min_players, 2);
        assert_eq!(game.max_players, 8);
    }

    #[rstest]
    fn serialises_to_camel_case() {
        let game = NewGame::from(first_entry()).into_game(EntityId::from_i64(1));
        let json = serde_json::to_value(&game).expect("serialize");
        assert!(json.get("imageUrl").is_some());
        assert!(json.get("minPlayers").is_some());
        assert!(json.get("image_url").is_none());
    }
}
