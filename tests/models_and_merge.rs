use regstat::{Area, AreaCollection, Error, Measure};

fn measure(code: &str, points: &[(i32, f64)]) -> Measure {
    let mut m = Measure::new(code, "Label");
    for &(y, v) in points {
        m.set_value(y, v);
    }
    m
}

#[test]
fn set_name_then_get_name_round_trips_for_valid_codes() {
    let mut a = Area::new("W06000011");
    for (lang, name) in [("eng", "Swansea"), ("cym", "Abertawe"), ("FRA", "Swansea (fr)")] {
        a.set_name(lang, name).unwrap();
        assert_eq!(a.name(lang).unwrap(), name);
    }
    assert!(matches!(a.name("deu"), Err(Error::NotFound(_))));
}

#[test]
fn set_name_rejects_non_three_letter_codes() {
    let mut a = Area::new("W06000011");
    for bad in ["en", "engl", "3ng", "e-g"] {
        assert!(matches!(a.set_name(bad, "x"), Err(Error::InvalidFormat(_))), "{bad}");
    }
}

#[test]
fn codename_is_lowercased_everywhere() {
    let m = Measure::new("PoP", "Population");
    assert_eq!(m.codename(), "pop");

    let mut a = Area::new("W1");
    a.set_measure("POP", m);
    assert_eq!(a.measures().keys().collect::<Vec<_>>(), vec!["pop"]);
    assert_eq!(a.measure("Pop").unwrap().label(), "Population");
    assert!(matches!(a.measure("dens"), Err(Error::NotFound(_))));
}

#[test]
fn set_value_replaces_and_value_reports_missing_year() {
    let mut m = measure("pop", &[(2000, 1.0)]);
    m.set_value(2000, 2.0);
    assert_eq!(m.len(), 1);
    assert_eq!(m.value(2000).unwrap(), 2.0);
    let err = m.value(1999).unwrap_err();
    assert!(err.to_string().contains("1999"), "{err}");
}

#[test]
fn derived_statistics() {
    let m = measure("x", &[(2001, 10.0), (2002, 20.0), (2003, 30.0)]);
    assert_eq!(m.average(), 20.0);

    let m = measure("x", &[(1999, 100.0), (2010, 150.0)]);
    assert_eq!(m.difference(), 50.0);
    assert!((m.difference_as_percentage() - 33.333_333).abs() < 1e-5);

    let single = measure("x", &[(2000, 42.0)]);
    assert_eq!(single.difference(), 0.0);
    assert_eq!(single.difference_as_percentage(), 0.0);

    let empty = Measure::new("x", "X");
    assert_eq!(empty.average(), 0.0);
    assert_eq!(empty.difference(), 0.0);
}

#[test]
fn measure_merge_is_right_biased_union() {
    let mut a = measure("pop", &[(1999, 1.0), (2000, 2.0)]);
    let mut b = measure("pop", &[(2000, 20.0), (2001, 30.0)]);
    b.set_label("Population (revised)");
    a.overwrite_from(b);

    assert_eq!(a.label(), "Population (revised)");
    let years: Vec<(i32, f64)> = a.series().iter().map(|(y, v)| (*y, *v)).collect();
    assert_eq!(years, vec![(1999, 1.0), (2000, 20.0), (2001, 30.0)]);
}

#[test]
fn area_merge_unions_names_and_measures() {
    let mut a = Area::new("W1");
    a.set_name("eng", "Old").unwrap();
    a.set_name("cym", "Hen").unwrap();
    a.set_measure("pop", measure("pop", &[(1999, 1.0)]));

    let mut b = Area::new("W1");
    b.set_name("eng", "New").unwrap();
    b.set_measure("pop", measure("pop", &[(2000, 2.0)]));
    b.set_measure("dens", measure("dens", &[(2000, 9.0)]));

    a.overwrite_from(b);
    assert_eq!(a.name("eng").unwrap(), "New");
    assert_eq!(a.name("cym").unwrap(), "Hen");
    assert_eq!(a.len(), 2);
    assert_eq!(a.measure("pop").unwrap().len(), 2);
}

#[test]
fn areas_compare_by_code_names_and_measures() {
    let mut a = Area::new("W1");
    a.set_name("eng", "X").unwrap();
    let mut b = a.clone();
    assert_eq!(a, b);
    b.set_measure("pop", Measure::new("pop", "Population"));
    assert_ne!(a, b);
    a.set_measure("pop", Measure::new("pop", "Population"));
    assert_eq!(a, b);
    assert_ne!(Area::new("W1"), Area::new("W2"));
}

#[test]
fn upsert_is_idempotent() {
    let mut area = Area::new("W1");
    area.set_name("eng", "Test").unwrap();
    area.set_measure("pop", measure("pop", &[(1999, 10.0), (2000, 20.0)]));

    let mut once = AreaCollection::new();
    once.upsert("W1", area.clone());

    let mut twice = AreaCollection::new();
    twice.upsert("W1", area.clone());
    twice.upsert("W1", area);

    assert_eq!(once, twice);
    assert_eq!(twice.len(), 1);
}

#[test]
fn upsert_merges_existing_and_get_reports_missing() {
    let mut areas = AreaCollection::new();
    let mut first = Area::new("W1");
    first.set_name("eng", "Test").unwrap();
    areas.upsert("W1", first);

    let mut second = Area::new("W1");
    second.set_name("cym", "Prawf").unwrap();
    areas.upsert("W1", second);

    let got = areas.get("W1").unwrap();
    assert_eq!(got.names().len(), 2);
    assert!(matches!(areas.get("W2"), Err(Error::NotFound(_))));
}

#[test]
fn iteration_is_sorted_by_code() {
    let mut areas = AreaCollection::new();
    for code in ["W3", "W1", "W2"] {
        areas.upsert(code, Area::new(code));
    }
    let codes: Vec<&str> = areas.iter().map(|(c, _)| c).collect();
    assert_eq!(codes, vec!["W1", "W2", "W3"]);
}
