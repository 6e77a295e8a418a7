use std::{collections::HashMap, sync::LazyLock};

/// Synonyms and abbreviations riders actually type, keyed by the canonical
/// station they mean. Both sides go through [`sanitize`] before the map is
/// built, so lookups happen purely in sanitized space.
const ALIAS_TABLE: &[(&str, &[&str])] = &[
    ("SAN FRANCISCO", &["SF", "SAN FRAN"]),
    (
        "SOUTH SAN FRANCISCO",
        &[
            "S SAN FRANCISCO",
            "SOUTH SF",
            "SOUTH SAN FRAN",
            "S SAN FRAN",
            "S SF",
            "SO SF",
            "SO SAN FRANCISCO",
            "SO SAN FRAN",
        ],
    ),
    (
        "22ND ST",
        &[
            "TWENTY-SECOND STREET",
            "TWENTY-SECOND ST",
            "22ND STREET",
            "22ND",
            "TWENTY-SECOND",
            "22",
        ],
    ),
    ("MOUNTAIN VIEW", &["MT VIEW"]),
    (
        "CALIFORNIA AVENUE",
        &[
            "CAL AVE",
            "CALIFORNIA",
            "CALIFORNIA AVE",
            "CAL",
            "CAL AV",
            "CALIFORNIA AV",
        ],
    ),
    ("REDWOOD CITY", &["REDWOOD"]),
    ("SAN JOSE DIRIDON", &["DIRIDON", "SAN JOSE", "SJ DIRIDON", "SJ"]),
    ("COLLEGE PARK", &["COLLEGE"]),
    ("BLOSSOM HILL", &["BLOSSOM"]),
    ("MORGAN HILL", &["MORGAN"]),
    ("HAYWARD PARK", &["HAYWARD"]),
    ("MENLO PARK", &["MENLO"]),
];

/// Stop names the feed has carried inconsistently over the years, mapped
/// to the spelling the rest of the data uses. Applied to the upper-cased
/// raw name before title-casing.
const RENAME_TABLE: &[(&str, &str)] = &[
    ("SO. SAN FRANCISCO", "SOUTH SAN FRANCISCO"),
    ("MT VIEW", "MOUNTAIN VIEW"),
    ("CALIFORNIA AVE", "CALIFORNIA AVENUE"),
];

static ALIASES: LazyLock<HashMap<String, String>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for (canonical, aliases) in ALIAS_TABLE {
        for alias in *aliases {
            map.insert(sanitize(alias), sanitize(canonical));
        }
    }
    map
});

/// Strips a station name down to its comparable core: ASCII letters and
/// digits only, lower-cased, with every "station" substring removed.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase()
        .replace("station", "")
}

/// Maps a sanitized alias to its sanitized canonical form, or returns the
/// input unchanged when it is not a known alias.
pub fn resolve_alias<'a>(sanitized: &'a str) -> &'a str {
    ALIASES
        .get(sanitized)
        .map(String::as_str)
        .unwrap_or(sanitized)
}

/// The key free text resolves to: sanitized, then alias-resolved.
pub fn canonical_key(name: &str) -> String {
    let sanitized = sanitize(name);
    ALIASES.get(&sanitized).cloned().unwrap_or(sanitized)
}

/// Extracts the bare station name from the feed's "... Caltrain" /
/// "... Caltrain Station" display convention. Returns `None` for stop
/// records that do not follow it.
pub(crate) fn parse_station_display(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix(" Station").unwrap_or(trimmed);
    let name = trimmed.strip_suffix(" Caltrain")?.trim();
    if name.is_empty() { None } else { Some(name) }
}

/// Applies [`RENAME_TABLE`] to an upper-cased raw station name.
pub(crate) fn rename(upper: &str) -> &str {
    RENAME_TABLE
        .iter()
        .find(|(from, _)| *from == upper)
        .map(|(_, to)| *to)
        .unwrap_or(upper)
}

/// Title-cases the first alphabetic character of each word: "SOUTH SAN
/// FRANCISCO" becomes "South San Francisco", "22ND ST" becomes "22nd St".
pub(crate) fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Builds the display key a station is published under: each
/// non-alphanumeric character becomes an underscore and the rest is
/// lower-cased, so "San Francisco" keys as "san_francisco".
pub(crate) fn display_key(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

#[test]
fn sanitize_strips_punctuation_and_case() {
    assert_eq!(sanitize("South San Francisco"), "southsanfrancisco");
    assert_eq!(sanitize("22nd St."), "22ndst");
}

#[test]
fn sanitize_removes_station_suffix() {
    assert_eq!(sanitize("Menlo Park Station"), "menlopark");
}

#[test]
fn alias_hits_resolve_to_canonical() {
    assert_eq!(canonical_key("SF"), canonical_key("San Francisco"));
    assert_eq!(canonical_key("so. sf"), canonical_key("South San Francisco"));
    assert_eq!(canonical_key("Twenty-Second Street"), "22ndst");
}

#[test]
fn alias_misses_pass_through() {
    assert_eq!(resolve_alias("atlantis"), "atlantis");
}

#[test]
fn display_name_pattern_matches() {
    assert_eq!(
        parse_station_display("San Francisco Caltrain Station"),
        Some("San Francisco")
    );
    assert_eq!(
        parse_station_display("Mountain View Caltrain"),
        Some("Mountain View")
    );
}

#[test]
fn display_name_pattern_rejects_other_records() {
    assert_eq!(parse_station_display("Bayshore NB"), None);
    assert_eq!(parse_station_display(" Caltrain"), None);
}

#[test]
fn rename_table_applies() {
    assert_eq!(rename("MT VIEW"), "MOUNTAIN VIEW");
    assert_eq!(rename("SUNNYVALE"), "SUNNYVALE");
}

#[test]
fn title_case_handles_digit_words() {
    assert_eq!(title_case("SOUTH SAN FRANCISCO"), "South San Francisco");
    assert_eq!(title_case("22ND ST"), "22nd St");
}

#[test]
fn display_key_joins_words() {
    assert_eq!(display_key("San Francisco"), "san_francisco");
    assert_eq!(display_key("22nd St"), "22nd_st");
}
