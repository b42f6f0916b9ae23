use regstat::table::{self, TableOptions};
use regstat::{Area, AreaCollection, Measure};
use serde_json::{Value, json};

fn named(code: &str, eng: &str, cym: &str) -> Area {
    let mut a = Area::new(code);
    a.set_name("eng", eng).unwrap();
    a.set_name("cym", cym).unwrap();
    a
}

#[test]
fn export_of_named_area_without_measures() {
    let mut areas = AreaCollection::new();
    areas.upsert("W001", named("W001", "Test", "Prawf"));

    let v: Value = serde_json::from_str(&areas.to_json().unwrap()).unwrap();
    assert_eq!(v, json!({"W001": {"names": {"eng": "Test", "cym": "Prawf"}}}));
}

#[test]
fn export_of_empty_collection_is_empty_object() {
    assert_eq!(AreaCollection::new().to_json().unwrap(), "{}");
}

#[test]
fn export_includes_measures_keyed_by_year() {
    let mut area = named("W1", "Swansea", "Abertawe");
    let mut pop = Measure::new("pop", "Population");
    pop.set_value(2001, 223.3);
    pop.set_value(1991, 230.1);
    area.set_measure("pop", pop);
    area.set_measure("dens", Measure::new("dens", "Density"));
    let mut areas = AreaCollection::new();
    areas.upsert("W1", area);

    let v: Value = serde_json::from_str(&areas.to_json().unwrap()).unwrap();
    assert_eq!(
        v,
        json!({
            "W1": {
                "names": {"cym": "Abertawe", "eng": "Swansea"},
                "measures": {
                    "dens": {"label": "Density", "values": {}},
                    "pop": {"label": "Population", "values": {"1991": 230.1, "2001": 223.3}}
                }
            }
        })
    );

    // The document deserialises back into the typed export tree.
    let doc: regstat::export::ExportDocument =
        serde_json::from_str(&areas.to_json().unwrap()).unwrap();
    assert_eq!(doc, areas.export());
}

#[test]
fn report_has_one_block_per_area_in_code_order() {
    let mut areas = AreaCollection::new();
    let mut swansea = named("W06000011", "Swansea", "Abertawe");
    let mut pop = Measure::new("pop", "Population");
    pop.set_value(1991, 100.0);
    pop.set_value(1992, 110.0);
    swansea.set_measure("pop", pop);
    areas.upsert("W06000011", swansea);
    areas.upsert("W06000001", named("W06000001", "Isle of Anglesey", "Ynys Môn"));

    let out = areas.render();
    let blocks: Vec<&str> = out.split("\n\n").filter(|b| !b.is_empty()).collect();
    assert_eq!(blocks.len(), 2);
    assert_eq!(
        blocks[0],
        "Isle of Anglesey / Ynys Môn (W06000001)\n<no measures>"
    );
    assert!(blocks[1].starts_with("Swansea / Abertawe (W06000011)\nPopulation (pop)\n"));
    assert!(blocks[1].contains("100.000000 110.000000 105.000000 10.000000 9.090909"));
}

#[test]
fn report_languages_are_configurable() {
    let mut areas = AreaCollection::new();
    areas.upsert("W1", named("W1", "Swansea", "Abertawe"));
    let opts = TableOptions {
        primary_lang: "cym".into(),
        secondary_lang: "fra".into(),
    };
    assert!(areas.render_with(&opts).starts_with("Abertawe (W1)\n"));
    assert_eq!(table::format_value(1.0 / 3.0), "0.333333");
}
