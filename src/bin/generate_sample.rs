use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One CSV row, laid out the way the loader reads it by position.
#[derive(Serialize)]
struct Listing {
    id: i64,
    neighbourhood_group: &'static str,
    room_type: &'static str,
    price: i64,
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // (borough, typical nightly price multiplier)
    let boroughs = [
        ("Bronx", 0.8),
        ("Brooklyn", 1.0),
        ("Manhattan", 1.5),
        ("Queens", 0.9),
        ("Staten Island", 0.85),
    ];
    // (room type, median nightly price)
    let room_types = [
        ("Entire home/apt", 170.0),
        ("Private room", 75.0),
        ("Shared room", 60.0),
    ];
    let per_pair = 40;

    let mut listings = Vec::new();
    let mut id: i64 = 1;
    for &(borough, scale) in &boroughs {
        for &(room, median) in &room_types {
            // Left empty on purpose so tables show an N/A cell.
            if borough == "Staten Island" && room == "Shared room" {
                continue;
            }
            for _ in 0..per_pair {
                // Log-normal spread around the median, never negative.
                let price = (median * scale * rng.gauss(0.0, 0.5).exp()).round().max(0.0) as i64;
                listings.push(Listing {
                    id,
                    neighbourhood_group: borough,
                    room_type: room,
                    price,
                });
                id += 1;
            }
        }
    }

    // Write CSV
    let csv_path = "sample_listings.csv";
    let mut writer = csv::Writer::from_path(csv_path).context("creating CSV output")?;
    for listing in &listings {
        writer.serialize(listing).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV output")?;

    // Write Parquet
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("location", DataType::Utf8, false),
        Field::new("property_type", DataType::Utf8, false),
        Field::new("price", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(listings.iter().map(|l| l.id))),
            Arc::new(StringArray::from_iter_values(
                listings.iter().map(|l| l.neighbourhood_group),
            )),
            Arc::new(StringArray::from_iter_values(listings.iter().map(|l| l.room_type))),
            Arc::new(Int64Array::from_iter_values(listings.iter().map(|l| l.price))),
        ],
    )
    .context("building record batch")?;

    let parquet_path = "sample_listings.parquet";
    let file = std::fs::File::create(parquet_path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;

    println!(
        "Wrote {} listings to {csv_path} and {parquet_path}",
        listings.len()
    );
    Ok(())
}
