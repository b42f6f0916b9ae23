use regstat::export::{self, ExportDocument};
use regstat::{Area, AreaCollection, Measure};
use std::fs;

fn sample() -> AreaCollection {
    let mut area = Area::new("W06000011");
    area.set_name("eng", "Swansea").unwrap();
    area.set_name("cym", "Abertawe").unwrap();
    let mut pop = Measure::new("pop", "Population");
    pop.set_value(1991, 230.1);
    pop.set_value(2001, 223.3);
    area.set_measure("pop", pop);

    let mut areas = AreaCollection::new();
    areas.upsert("W06000011", area);
    areas.upsert("W06000023", Area::new("W06000023"));
    areas
}

#[test]
fn save_csv_and_json() {
    let areas = sample();
    let dir = tempfile::tempdir().unwrap();

    let csv_path = dir.path().join("out.csv");
    export::save_csv(&areas, &csv_path).unwrap();
    let csv_txt = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv_txt.lines().collect();
    assert_eq!(lines[0], "authority_code,name_eng,name_cym,measure,label,year,value");
    assert_eq!(lines[1], "W06000011,Swansea,Abertawe,pop,Population,1991,230.1");
    // One row per observation; areas without measures produce none.
    assert_eq!(lines.len(), 3);

    let json_path = dir.path().join("out.json");
    export::save_json(&areas, &json_path).unwrap();
    let doc: ExportDocument = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(doc, areas.export());
    assert!(doc["W06000023"].measures.is_empty());
}

// Cells starting with = + - @ would be evaluated as formulas by spreadsheet
// applications, so they are written with a leading quote.
#[test]
fn csv_cells_are_prefixed_to_avoid_formulas() {
    let mut area = Area::new("=HYPERLINK(\"http://evil\")");
    area.set_name("eng", "+SUM(A1:A9)").unwrap();
    area.set_name("cym", "@foo").unwrap();
    let mut m = Measure::new("-cmd", "Label");
    m.set_value(2020, -1.5);
    area.set_measure("-cmd", m);
    let mut areas = AreaCollection::new();
    areas.upsert("=HYPERLINK(\"http://evil\")", area);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inj.csv");
    export::save_csv(&areas, &path).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let rec = rdr.records().next().unwrap().unwrap();
    assert_eq!(&rec[0], "'=HYPERLINK(\"http://evil\")");
    assert_eq!(&rec[1], "'+SUM(A1:A9)");
    assert_eq!(&rec[2], "'@foo");
    assert_eq!(&rec[3], "'-cmd");
    // Numbers are written as numbers.
    assert_eq!(&rec[6], "-1.5");
}
