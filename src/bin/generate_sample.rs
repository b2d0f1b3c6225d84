use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::print_batches;
use parquet::arrow::ArrowWriter;
use serde_json::json;

const SEASONS: [(&str, f64); 4] = [
    ("hiver", 1.3),
    ("printemps", 1.0),
    ("été", 0.6),
    ("automne", 0.8),
];
const PASSES: [(&str, f64); 3] = [("simple", 35.0), ("double", 60.0), ("illimité", 120.0)];
const LEVELS: [&str; 4] = ["débutant", "intermédiaire", "avancé", "expert"];

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

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

struct Columns {
    id: Vec<i64>,
    season: Vec<&'static str>,
    price: Vec<f64>,
    age: Vec<i64>,
    level: Vec<&'static str>,
    accounted: Vec<bool>,
    pass: Vec<&'static str>,
}

fn generate(n: usize, rng: &mut SimpleRng) -> Columns {
    let mut cols = Columns {
        id: Vec::with_capacity(n),
        season: Vec::with_capacity(n),
        price: Vec::with_capacity(n),
        age: Vec::with_capacity(n),
        level: Vec::with_capacity(n),
        accounted: Vec::with_capacity(n),
        pass: Vec::with_capacity(n),
    };

    for i in 0..n {
        let &(season, season_factor) = rng.pick(&SEASONS);
        let &(pass, base_price) = rng.pick(&PASSES);
        let price = base_price * season_factor * rng.range(0.85, 1.15);

        cols.id.push(i as i64 + 1);
        cols.season.push(season);
        cols.price.push((price * 100.0).round() / 100.0);
        cols.age.push(rng.range(6.0, 75.0) as i64);
        cols.level.push(*rng.pick(&LEVELS));
        cols.accounted.push(rng.next_f64() < 0.5);
        cols.pass.push(pass);
    }
    cols
}

fn write_json(cols: &Columns, path: &str) -> Result<()> {
    let rows: Vec<serde_json::Value> = (0..cols.id.len())
        .map(|i| {
            json!({
                "id": cols.id[i],
                "saison": cols.season[i],
                "prix": cols.price[i],
                "age": cols.age[i],
                "niveau": cols.level[i],
                "compte": cols.accounted[i],
                "passe": cols.pass[i],
            })
        })
        .collect();
    let text = serde_json::to_string_pretty(&rows).context("serializing JSON")?;
    std::fs::write(path, text).with_context(|| format!("writing {path}"))
}

fn write_parquet(cols: Columns, path: &str) -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("saison", DataType::Utf8, false),
        Field::new("prix", DataType::Float64, false),
        Field::new("age", DataType::Int64, false),
        Field::new("niveau", DataType::Utf8, false),
        Field::new("compte", DataType::Boolean, false),
        Field::new("passe", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(cols.id)),
            Arc::new(StringArray::from(cols.season)),
            Arc::new(Float64Array::from(cols.price)),
            Arc::new(Int64Array::from(cols.age)),
            Arc::new(StringArray::from(cols.level)),
            Arc::new(BooleanArray::from(cols.accounted)),
            Arc::new(StringArray::from(cols.pass)),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(batch)
}

fn main() -> Result<()> {
    let n: usize = match std::env::args().nth(1) {
        Some(arg) => arg.parse().with_context(|| format!("invalid record count '{arg}'"))?,
        None => 500,
    };

    let mut rng = SimpleRng::new(42);
    let cols = generate(n, &mut rng);

    write_json(&cols, "ski_passes.json")?;
    let batch = write_parquet(cols, "ski_passes.parquet")?;

    print_batches(&[batch.slice(0, batch.num_rows().min(5))]).context("printing preview")?;
    println!("Wrote {n} ski passes to ski_passes.json and ski_passes.parquet");
    Ok(())
}
