use commute::shared::names::{canonical_key, resolve_alias, sanitize};

#[test]
fn sanitize_strips_to_core() {
    assert_eq!(sanitize("South San Francisco"), "southsanfrancisco");
    assert_eq!(sanitize("22nd St."), "22ndst");
    assert_eq!(sanitize("Menlo Park Station"), "menlopark");
}

#[test]
fn canonical_key_is_idempotent() {
    for name in [
        "San Francisco",
        "South San Francisco",
        "22nd St",
        "Mountain View",
        "California Avenue",
        "San Jose Diridon",
        "Tamien",
    ] {
        let key = canonical_key(name);
        assert_eq!(canonical_key(&key), key, "idempotence for {name}");
    }
}

#[test]
fn aliases_collapse_to_canonical() {
    assert_eq!(canonical_key("SF"), canonical_key("San Francisco"));
    assert_eq!(canonical_key("SAN FRAN"), canonical_key("San Francisco"));
    assert_eq!(canonical_key("so sf"), canonical_key("South San Francisco"));
    assert_eq!(canonical_key("22"), canonical_key("22nd St"));
    assert_eq!(canonical_key("Cal Ave"), canonical_key("California Avenue"));
    assert_eq!(canonical_key("SJ"), canonical_key("San Jose Diridon"));
}

#[test]
fn unknown_names_pass_through() {
    assert_eq!(resolve_alias("atlantis"), "atlantis");
    assert_eq!(canonical_key("Atlantis"), "atlantis");
}
