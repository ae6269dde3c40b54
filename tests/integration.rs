use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::{Builder, NamedTempFile};

use rent_tables::config::{AppConfig, MenuHeader};
use rent_tables::currency::{Currency, convert};
use rent_tables::data::crosstab::{Cell, cell_stats};
use rent_tables::data::loader::load_file;
use rent_tables::data::model::{Category, DatasetError, Record, Stat, Summary};
use rent_tables::state::{AppState, Settings};
use rent_tables::ui::menu::{self, Console};

const LISTINGS_CSV: &str = "\
id,neighbourhood_group,room_type,price
2539,Bronx,Private room,0
2595,Bronx,Private room,2500
3647,Queens,Shared room,10
";

fn temp_with(suffix: &str, contents: &str) -> NamedTempFile {
    let mut tmp = Builder::new().suffix(suffix).tempfile().unwrap();
    write!(tmp, "{}", contents).unwrap();
    tmp
}

fn settings_for(path: &Path) -> Settings {
    Settings {
        home_currency: Currency::Usd,
        header: MenuHeader::new("AirBNB 2021").unwrap(),
        copyright: "copyright 2021".into(),
        data_path: path.to_path_buf(),
    }
}

#[test]
fn end_to_end_example() {
    let tmp = temp_with(".csv", LISTINGS_CSV);
    let mut state = AppState::new(settings_for(tmp.path()));
    assert_eq!(state.reload().unwrap(), 3);

    assert_eq!(
        cell_stats(&state.dataset, "Bronx", "Private room").unwrap(),
        Summary { min: 0.0, avg: 1250.0, max: 2500.0 }
    );

    let grid = state.grid(Stat::Avg).unwrap();
    assert_eq!(grid.get("Bronx", "Shared room"), Some(Cell::NotAvailable));
    assert_eq!(grid.get("Queens", "Shared room"), Some(Cell::Value(10.0)));

    let eur = convert(10.0, Currency::Usd, Currency::Eur).unwrap();
    assert!((eur - 8.4).abs() < 1e-9);
}

#[test]
fn bad_reload_keeps_previous_dataset() {
    let good = temp_with(".csv", LISTINGS_CSV);
    let bad = temp_with(
        ".csv",
        "id,loc,type,price\n1,Manhattan,Entire home/apt,225\n2,Manhattan,Entire home/apt,n/a\n",
    );

    let mut state = AppState::new(settings_for(good.path()));
    state.reload().unwrap();

    assert!(state.load_path(bad.path()).is_err());
    assert!(state
        .status_message
        .as_deref()
        .is_some_and(|msg| msg.contains("'n/a' is not a whole price")));
    assert_eq!(state.dataset.len(), 3);
    assert!(!state
        .dataset
        .labels(Category::Location)
        .unwrap()
        .contains("Manhattan"));
}

#[test]
fn header_only_file_empties_dataset() {
    let good = temp_with(".csv", LISTINGS_CSV);
    let empty = temp_with(".csv", "id,loc,type,price\n");

    let mut state = AppState::new(settings_for(good.path()));
    state.reload().unwrap();

    let err = state.load_path(empty.path()).unwrap_err();
    assert_eq!(
        err.downcast_ref::<DatasetError>(),
        Some(&DatasetError::EmptyDataset)
    );
    assert_eq!(state.grid(Stat::Min), Err(DatasetError::EmptyDataset));
}

#[test]
fn json_listings() {
    let tmp = temp_with(
        ".json",
        r#"[
            { "location": "Brooklyn", "property_type": "Entire home/apt", "price": 150 },
            { "location": "Brooklyn", "property_type": "Entire home/apt", "price": 250 }
        ]"#,
    );
    let records = load_file(tmp.path()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1], Record::new("Brooklyn", "Entire home/apt", 250));
}

#[test]
fn json_negative_price_is_rejected() {
    let tmp = temp_with(
        ".json",
        r#"[{ "location": "Bronx", "property_type": "Private room", "price": -5 }]"#,
    );
    assert!(load_file(tmp.path()).is_err());
}

#[test]
fn parquet_listings() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("location", DataType::Utf8, false),
        Field::new("property_type", DataType::Utf8, false),
        Field::new("price", DataType::Int32, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(vec!["Queens", "Queens", "Bronx"])),
            Arc::new(StringArray::from(vec![
                "Private room",
                "Private room",
                "Shared room",
            ])),
            Arc::new(Int32Array::from(vec![40, 80, 35])),
        ],
    )
    .unwrap();

    let tmp = Builder::new().suffix(".parquet").tempfile().unwrap();
    let file = std::fs::File::create(tmp.path()).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let mut state = AppState::new(settings_for(tmp.path()));
    assert_eq!(state.reload().unwrap(), 3);
    assert_eq!(
        cell_stats(&state.dataset, "Queens", "Private room").unwrap(),
        Summary { min: 40.0, avg: 60.0, max: 80.0 }
    );
}

#[test]
fn menu_session_prints_tables() {
    let tmp = temp_with(".csv", LISTINGS_CSV);
    let config = AppConfig {
        data_path: tmp.path().to_path_buf(),
        copyright: "copyright 2021".into(),
        home_currency: None,
        header: None,
    };

    let input = "Luke\nUSD\nAirBNB 2021\n1\n4\n1\n2\n3\n9\n";
    let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());

    let settings = menu::setup(&mut console, &config).unwrap().unwrap();
    let mut state = AppState::new(settings);
    menu::run(&mut console, &mut state).unwrap();

    let out = String::from_utf8(console.into_output()).unwrap();

    assert!(out.contains("Options for converting from USD:"));
    assert_eq!(out.matches("Please load a DataSet first").count(), 1);
    assert!(out.contains("Loaded 3 listings\n"));

    let header_row = format!("{}{:<22}{:<22}", " ".repeat(20), "Private room", "Shared room");
    assert_eq!(out.matches(&header_row).count(), 3);

    // average, minimum, maximum rows for Bronx in order
    let avg = format!("{:<20}$ {:<20}$ {:<20}", "Bronx", "1250.00", "N/A");
    let min = format!("{:<20}$ {:<20}$ {:<20}", "Bronx", "0.00", "N/A");
    let max = format!("{:<20}$ {:<20}$ {:<20}", "Bronx", "2500.00", "N/A");
    let (a, b, c) = (
        out.find(&avg).unwrap(),
        out.find(&min).unwrap(),
        out.find(&max).unwrap(),
    );
    assert!(a < b && b < c);

    assert!(out.ends_with("Goodbye!  Thank you for using the database\n"));
}
