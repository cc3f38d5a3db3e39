//! Static directory of Telegram data centers.

/// `(dc id, location)` pairs, ordered by id.
const DC_LOCATIONS: [(u32, &str); 15] = [
    (1, "MIA, Miami, USA, US"),
    (2, "AMS, Amsterdam, Netherlands, NL"),
    (3, "MBA, Mumbai, India, IN"),
    (4, "STO, Stockholm, Sweden, SE"),
    (5, "SIN, Singapore, SG"),
    (6, "LHR, London, United Kingdom, GB"),
    (7, "FRA, Frankfurt, Germany, DE"),
    (8, "JFK, New York, USA, US"),
    (9, "HKG, Hong Kong, HK"),
    (10, "TYO, Tokyo, Japan, JP"),
    (11, "SYD, Sydney, Australia, AU"),
    (12, "GRU, São Paulo, Brazil, BR"),
    (13, "DXB, Dubai, UAE, AE"),
    (14, "CDG, Paris, France, FR"),
    (15, "ICN, Seoul, South Korea, KR"),
];

pub const UNKNOWN_LOCATION: &str = "Unknown";

/// Location string for a data center id, if it is a known one.
pub fn location(dc_id: u32) -> Option<&'static str> {
    DC_LOCATIONS
        .iter()
        .find(|(id, _)| *id == dc_id)
        .map(|(_, loc)| *loc)
}

/// `"{id} ({location})"`; an absent id renders as `None`, an unknown one as `Unknown`.
pub fn describe(dc_id: Option<u32>) -> String {
    match dc_id {
        Some(id) => format!("{id} ({})", location(id).unwrap_or(UNKNOWN_LOCATION)),
        None => format!("None ({UNKNOWN_LOCATION})"),
    }
}
