//! Market tiering for the free-text location on the form.
//!
//! Lookup is an explicit table: ZIP codes resolve by their three-digit prefix,
//! everything else by normalized city name. Nothing is geocoded.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationTier {
    MajorMetro,
    MidSizeMarket,
    SmallMarket,
}

impl LocationTier {
    pub fn number(&self) -> u8 {
        match self {
            Self::MajorMetro => 1,
            Self::MidSizeMarket => 2,
            Self::SmallMarket => 3,
        }
    }
}

struct MarketArea {
    name: &'static str,
    tier: LocationTier,
    cities: &'static [&'static str],
    zip_prefixes: &'static [&'static str],
}

const OTHER_MARKET: &str = "Other market";

const MARKETS: &[MarketArea] = &[
    MarketArea {
        name: "New York Metro",
        tier: LocationTier::MajorMetro,
        cities: &["new york", "new york city", "nyc", "manhattan", "brooklyn", "queens", "bronx"],
        zip_prefixes: &["100", "101", "102", "103", "104", "112", "113", "114", "116"],
    },
    MarketArea {
        name: "Los Angeles Metro",
        tier: LocationTier::MajorMetro,
        cities: &["los angeles", "la", "beverly hills", "santa monica", "pasadena", "long beach", "glendale"],
        zip_prefixes: &["900", "902", "903", "904", "905", "906", "907", "908", "910", "911", "912", "913", "914", "915", "916", "917", "918"],
    },
    MarketArea {
        name: "San Francisco Bay Area",
        tier: LocationTier::MajorMetro,
        cities: &["san francisco", "sf", "oakland", "san jose", "palo alto", "berkeley"],
        zip_prefixes: &["940", "941", "944", "945", "946", "947", "950", "951"],
    },
    MarketArea {
        name: "Miami Metro",
        tier: LocationTier::MajorMetro,
        cities: &["miami", "miami beach", "fort lauderdale", "hialeah"],
        zip_prefixes: &["330", "331", "332", "333"],
    },
    MarketArea {
        name: "Chicago Metro",
        tier: LocationTier::MajorMetro,
        cities: &["chicago", "evanston"],
        zip_prefixes: &["606", "607", "608"],
    },
    MarketArea {
        name: "Dallas-Houston",
        tier: LocationTier::MajorMetro,
        cities: &["dallas", "houston", "fort worth", "plano"],
        zip_prefixes: &["750", "751", "752", "753", "770", "772"],
    },
    MarketArea {
        name: "Washington DC Metro",
        tier: LocationTier::MajorMetro,
        cities: &["washington", "washington dc", "dc", "arlington", "alexandria", "bethesda"],
        zip_prefixes: &["200", "202", "203", "204", "205", "222", "223", "208"],
    },
    MarketArea {
        name: "Boston Metro",
        tier: LocationTier::MajorMetro,
        cities: &["boston", "cambridge", "somerville"],
        zip_prefixes: &["021", "022"],
    },
    MarketArea {
        name: "Seattle Metro",
        tier: LocationTier::MajorMetro,
        cities: &["seattle", "bellevue", "redmond"],
        zip_prefixes: &["980", "981"],
    },
    MarketArea {
        name: "Atlanta Metro",
        tier: LocationTier::MidSizeMarket,
        cities: &["atlanta", "marietta", "decatur"],
        zip_prefixes: &["300", "301", "303"],
    },
    MarketArea {
        name: "San Diego",
        tier: LocationTier::MidSizeMarket,
        cities: &["san diego", "chula vista"],
        zip_prefixes: &["919", "920", "921"],
    },
    MarketArea {
        name: "Orange County",
        tier: LocationTier::MidSizeMarket,
        cities: &["irvine", "anaheim", "santa ana", "garden grove", "westminster", "huntington beach", "costa mesa"],
        zip_prefixes: &["926", "927", "928"],
    },
    MarketArea {
        name: "Phoenix Metro",
        tier: LocationTier::MidSizeMarket,
        cities: &["phoenix", "scottsdale", "mesa", "tempe"],
        zip_prefixes: &["850", "852", "853"],
    },
    MarketArea {
        name: "Austin",
        tier: LocationTier::MidSizeMarket,
        cities: &["austin"],
        zip_prefixes: &["733", "787"],
    },
    MarketArea {
        name: "Denver",
        tier: LocationTier::MidSizeMarket,
        cities: &["denver", "aurora", "boulder"],
        zip_prefixes: &["800", "801", "802", "803"],
    },
    MarketArea {
        name: "Las Vegas",
        tier: LocationTier::MidSizeMarket,
        cities: &["las vegas", "henderson"],
        zip_prefixes: &["889", "890", "891"],
    },
    MarketArea {
        name: "Orlando-Tampa",
        tier: LocationTier::MidSizeMarket,
        cities: &["orlando", "tampa", "st petersburg", "st. petersburg"],
        zip_prefixes: &["327", "328", "335", "336", "337"],
    },
    MarketArea {
        name: "Philadelphia",
        tier: LocationTier::MidSizeMarket,
        cities: &["philadelphia"],
        zip_prefixes: &["190", "191"],
    },
    MarketArea {
        name: "Pacific Northwest",
        tier: LocationTier::MidSizeMarket,
        cities: &["portland", "tacoma"],
        zip_prefixes: &["970", "971", "972", "983", "984"],
    },
    MarketArea {
        name: "Carolinas",
        tier: LocationTier::MidSizeMarket,
        cities: &["charlotte", "raleigh", "durham"],
        zip_prefixes: &["276", "277", "282"],
    },
    MarketArea {
        name: "Nashville",
        tier: LocationTier::MidSizeMarket,
        cities: &["nashville"],
        zip_prefixes: &["370", "372"],
    },
    MarketArea {
        name: "Minneapolis-St. Paul",
        tier: LocationTier::MidSizeMarket,
        cities: &["minneapolis", "st paul", "st. paul", "saint paul"],
        zip_prefixes: &["553", "554", "551"],
    },
    MarketArea {
        name: "Sacramento",
        tier: LocationTier::MidSizeMarket,
        cities: &["sacramento"],
        zip_prefixes: &["956", "957", "958"],
    },
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocationMatch {
    pub area_name: String,
    pub tier: LocationTier,
}

pub fn classify_location(location: &str) -> LocationMatch {
    let trimmed = location.trim();
    let area = match zip_prefix(trimmed) {
        Some(prefix) => MARKETS
            .iter()
            .find(|market| market.zip_prefixes.iter().any(|zip| *zip == prefix)),
        None => {
            let city = normalize_city(trimmed);
            MARKETS
                .iter()
                .find(|market| market.cities.iter().any(|name| *name == city))
        }
    };

    match area {
        Some(market) => LocationMatch {
            area_name: market.name.to_string(),
            tier: market.tier,
        },
        None => LocationMatch {
            area_name: OTHER_MARKET.to_string(),
            tier: LocationTier::SmallMarket,
        },
    }
}

/// Three-digit prefix of a `12345` or `12345-6789` ZIP code.
fn zip_prefix(input: &str) -> Option<&str> {
    let (five, plus_four) = match input.split_once('-') {
        Some((five, rest)) => (five, Some(rest)),
        None => (input, None),
    };

    let digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(five, 5) || plus_four.is_some_and(|rest| !digits(rest, 4)) {
        return None;
    }
    Some(&five[..3])
}

/// `"  Beverly   Hills , CA"` -> `"beverly hills"`
fn normalize_city(input: &str) -> String {
    let city = input.split(',').next().unwrap_or_default();
    city.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
