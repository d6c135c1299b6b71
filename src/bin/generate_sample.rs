use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray, TimestampMillisecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const BASES: [char; 4] = ['A', 'C', 'G', 'U'];
const OLIGO_LEN: usize = 20;

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

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

fn random_oligo(rng: &mut SimpleRng) -> String {
    (0..OLIGO_LEN).map(|_| BASES[rng.below(BASES.len())]).collect()
}

fn gc_fraction(seq: &str) -> f64 {
    let gc = seq.chars().filter(|c| *c == 'G' || *c == 'C').count();
    gc as f64 / seq.len() as f64
}

/// Rough duplex stability: GC pairs bind tighter than AU pairs.
fn binding_energy(seq: &str, rng: &mut SimpleRng) -> f64 {
    let per_base: f64 = seq
        .chars()
        .map(|c| if c == 'G' || c == 'C' { -1.6 } else { -0.9 })
        .sum();
    ((per_base + rng.next_f64() * 2.0 - 1.0) * 100.0).round() / 100.0
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let targets = ["BRCA1", "TP53", "EGFR"];
    let regions = ["5' UTR", "CDS", "3' UTR"];
    let transcript_len = 3000;
    // 2025-01-06T08:00:00Z
    let first_run_ms: i64 = 1_736_150_400_000;
    let hour_ms: i64 = 3_600_000;

    let mut ids = Vec::new();
    let mut target_names = Vec::new();
    let mut sequences = Vec::new();
    let mut positions = Vec::new();
    let mut gc = Vec::new();
    let mut energies = Vec::new();
    let mut accessibility = Vec::new();
    let mut region_col = Vec::new();
    let mut created = Vec::new();
    let mut notes: Vec<Option<String>> = Vec::new();

    let mut row_id = 0;
    for (t, target) in targets.iter().enumerate() {
        for _ in 0..40 {
            let seq = random_oligo(&mut rng);
            let position = rng.below(transcript_len - OLIGO_LEN) as i64 + 1;
            let region = match position {
                p if p < 300 => regions[0],
                p if p < 2500 => regions[1],
                _ => regions[2],
            };

            ids.push(format!("oligo_{row_id:04}"));
            target_names.push(target.to_string());
            positions.push(position);
            gc.push(gc_fraction(&seq));
            energies.push(binding_energy(&seq, &mut rng));
            accessibility.push((rng.next_f64() * 1000.0).round() / 1000.0);
            region_col.push(region.to_string());
            created.push(first_run_ms + (t as i64 * 24 + rng.below(12) as i64) * hour_ms);
            notes.push((rng.below(5) == 0).then(|| "manual review".to_string()));
            sequences.push(seq);
            row_id += 1;
        }
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Utf8, false),
        Field::new("target_name", DataType::Utf8, false),
        Field::new("sequence", DataType::Utf8, false),
        Field::new("site_position", DataType::Int64, false),
        Field::new("gc_content", DataType::Float64, false),
        Field::new("binding_energy", DataType::Float64, false),
        Field::new("accessibility", DataType::Float64, false),
        Field::new("region", DataType::Utf8, false),
        Field::new(
            "created_at",
            DataType::Timestamp(TimeUnit::Millisecond, None),
            false,
        ),
        Field::new("notes", DataType::Utf8, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(ids)),
            Arc::new(StringArray::from(target_names)),
            Arc::new(StringArray::from(sequences)),
            Arc::new(Int64Array::from(positions)),
            Arc::new(Float64Array::from(gc)),
            Arc::new(Float64Array::from(energies)),
            Arc::new(Float64Array::from(accessibility)),
            Arc::new(StringArray::from(region_col)),
            Arc::new(TimestampMillisecondArray::from(created)),
            Arc::new(StringArray::from(notes)),
        ],
    )
    .expect("Failed to create RecordBatch");

    // Write Parquet
    let output_path = "sample_results.parquet";
    let file = std::fs::File::create(output_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!("Wrote {row_id} oligo results to {output_path}");
}
