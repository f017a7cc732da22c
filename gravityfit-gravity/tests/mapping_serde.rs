use gravityfit_gravity::*;

#[test]
fn mapping_uses_lowercase_wire_names() {
    assert_eq!(serde_json::to_string(&Mapping::Nonlinear).unwrap(), "\"nonlinear\"");
    let parsed: Mapping = serde_json::from_str("\"linear\"").unwrap();
    assert_eq!(parsed, Mapping::Linear);
    assert!(serde_json::from_str::<Mapping>("\"exponential\"").is_err());
}

#[test]
fn derived_index_for_known_worlds() {
    // Earth-like: fraction 1.0 -> index 1
    let earth = gravity_fraction(1.0, 1.0).unwrap();
    assert_eq!(intensity_index(earth, DEFAULT_ALPHA, Mapping::default()), 1);

    // mass 1, radius 2 -> 0.25 -> round(7.75) = 8
    let light = gravity_fraction(1.0, 2.0).unwrap();
    assert_eq!(intensity_index(light, DEFAULT_ALPHA, Mapping::Linear), 8);
}
