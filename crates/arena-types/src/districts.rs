//! The twelve districts tributes are drawn from.

use serde::Serialize;

/// Static description of a district.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct District {
    /// District number, 1 through 12.
    pub id: u8,
    /// Primary industry.
    pub name: &'static str,
    /// Display glyph.
    pub emoji: &'static str,
    /// Whether the district trains its tributes before the games.
    pub career: bool,
}

/// Number of districts.
pub const DISTRICT_COUNT: u8 = 12;

/// All districts in id order.
pub const DISTRICTS: [District; 12] = [
    District { id: 1, name: "Luxury items", emoji: "💎", career: true },
    District { id: 2, name: "Masonry, defense, weaponry", emoji: "🛡️", career: true },
    District { id: 3, name: "Electronics, technology", emoji: "⚙️", career: false },
    District { id: 4, name: "Fishing", emoji: "🎣", career: true },
    District { id: 5, name: "Power, energy", emoji: "⚡", career: false },
    District { id: 6, name: "Transportation", emoji: "🚆", career: false },
    District { id: 7, name: "Lumber, wood", emoji: "🪵", career: false },
    District { id: 8, name: "Textiles, clothing", emoji: "🧵", career: false },
    District { id: 9, name: "Grain, agriculture", emoji: "🌾", career: false },
    District { id: 10, name: "Livestock, meat", emoji: "🐄", career: false },
    District { id: 11, name: "Agriculture, food production", emoji: "🍎", career: false },
    District { id: 12, name: "Coal mining", emoji: "⛏️", career: false },
];

/// Look up a district, falling back to an "Unknown" entry for bad ids.
pub fn district_info(id: u8) -> District {
    DISTRICTS
        .iter()
        .copied()
        .find(|d| d.id == id)
        .unwrap_or(District {
            id,
            name: "Unknown",
            emoji: "🏷️",
            career: false,
        })
}
