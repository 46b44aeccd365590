//! Fixed VR game catalogue seeded into every storage backend.
//!
//! The catalogue is the single source of truth for the games offered by the
//! arena. It is deliberately independent of backend domain types so that the
//! backend converts entries at the point of use and no circular dependency
//! arises.
//!
//! # Example
//!
//! ```
//! use game_catalog::seed_catalog;
//!
//! let catalog = seed_catalog();
//! assert_eq!(catalog.len(), 6);
//! assert_eq!(catalog[0].name, "Zombie Apocalypse");
//! ```

use serde::{Deserialize, Serialize};

/// A single catalogue entry describing one bookable VR game.
///
/// Player bounds are advisory for the booking flow; the backend does not
/// reject bookings outside them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogGame {
    /// Display name shown on game cards.
    pub name: &'static str,
    /// Short marketing description.
    pub description: &'static str,
    /// Cover image URL.
    pub image_url: &'static str,
    /// Smallest team the arena will host for this game.
    pub min_players: i32,
    /// Largest team the arena will host for this game.
    pub max_players: i32,
}

const CATALOG: [CatalogGame; 6] = [
    CatalogGame {
        name: "Zombie Apocalypse",
        description: "Survive waves of undead in this intense VR shooter",
        image_url: "https://images.unsplash.com/photo-1592478411213-6153e4ebc07d",
        min_players: 2,
        max_players: 8,
    },
    CatalogGame {
        name: "Space Explorer",
        description: "Navigate through zero gravity and explore distant planets",
        image_url: "https://images.unsplash.com/photo-1459550428001-4ed6ca421293",
        min_players: 2,
        max_players: 6,
    },
    CatalogGame {
        name: "Medieval Quest",
        description: "Epic fantasy adventure with swords and sorcery",
        image_url: "https://images.unsplash.com/photo-1588590560438-5e27fe3f6b71",
        min_players: 2,
        max_players: 8,
    },
    CatalogGame {
        name: "Future Racing",
        description: "High-speed racing through neon-lit cityscapes",
        image_url: "https://images.unsplash.com/photo-1603459404909-2ce99c16ab54",
        min_players: 2,
        max_players: 6,
    },
    CatalogGame {
        name: "Cyber Arena",
        description: "Team-based combat in a digital battleground",
        image_url: "https://images.unsplash.com/photo-1493497029755-f49c8e9a8bbe",
        min_players: 4,
        max_players: 8,
    },
    CatalogGame {
        name: "Island Escape",
        description: "Solve puzzles and escape a mysterious tropical island",
        image_url: "https://images.unsplash.com/photo-1585591841924-285043b0c468",
        min_players: 2,
        max_players: 6,
    },
];

/// Return the catalogue in seeding order.
///
/// The order is stable: storage adapters assign ids in this order on first
/// start, and `GET /api/games` reflects it.
#[must_use]
pub fn seed_catalog() -> &'static [CatalogGame] {
    &CATALOG
}
