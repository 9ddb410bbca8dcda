/// The fixed set of bookable rooms, defined at compile time and never
/// mutated. Requests reference rooms by their lowercase id; an id outside
/// this set names nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Room {
    Aurora,
    Borealis,
    Helmi,
    Sauna,
    Sisu,
    Taiga,
}

/// Catalog definition order — also the order room listings report.
pub const ROOMS: [Room; 6] = [
    Room::Aurora,
    Room::Borealis,
    Room::Helmi,
    Room::Sauna,
    Room::Sisu,
    Room::Taiga,
];

impl Room {
    pub fn id(self) -> &'static str {
        match self {
            Room::Aurora => "aurora",
            Room::Borealis => "borealis",
            Room::Helmi => "helmi",
            Room::Sauna => "sauna",
            Room::Sisu => "sisu",
            Room::Taiga => "taiga",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Room::Aurora => "Aurora",
            Room::Borealis => "Borealis",
            Room::Helmi => "Helmi",
            Room::Sauna => "Sauna",
            Room::Sisu => "Sisu",
            Room::Taiga => "Taiga",
        }
    }

    /// Membership lookup over the six-entry catalog.
    pub fn from_id(id: &str) -> Option<Room> {
        ROOMS.iter().copied().find(|r| r.id() == id)
    }
}
