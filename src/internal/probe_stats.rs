#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]

use plotters::prelude::*;
use prime_probe::HashTable;
use rand::{Rng, distr::Alphanumeric};

// Number of random keys inserted, then deleted again
const KEY_COUNT: usize = 5_000;
const KEY_LENGTH: usize = 12;
// Take a sample after this many operations
const SAMPLE_EVERY: usize = 50;

#[derive(Debug, Clone, Copy)]
struct Sample {
    operation: usize,
    capacity: usize,
    len: usize,
    load: usize,
    average_probes: f64,
}

fn random_key(rng: &mut impl Rng) -> String {
    (0..KEY_LENGTH).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}

// Mean number of slots inspected by a successful search over `keys`
fn average_probes(table: &HashTable, keys: &[String]) -> f64 {
    if keys.is_empty() {
        return 0.0;
    }
    let total: usize = keys.iter().map(|key| table.probe_length(key)).sum();
    total as f64 / keys.len() as f64
}

fn sample(table: &HashTable, operation: usize, live: &[String]) -> Sample {
    Sample {
        operation,
        capacity: table.capacity(),
        len: table.len(),
        load: table.load(),
        average_probes: average_probes(table, live),
    }
}

// Replays the basic insert/search/delete script and reports whether every check held
fn scripted_scenario() -> bool {
    let mut table = HashTable::new();
    table.insert("key1", "value1");
    table.insert("key2", "value2");
    table.insert("key3", "value3");

    let mut ok = table.search("key1") == Some("value1")
        && table.search("key2") == Some("value2")
        && table.search("key3") == Some("value3")
        && table.search("nonexistent").is_none();

    table.delete("key1");
    ok &= table.search("key1").is_none();
    table.delete("key2");
    ok &= table.search("key2").is_none();
    table.delete("nonexistent");
    ok &= table.len() == 1;

    table.destroy();
    ok
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if scripted_scenario() {
        println!("Scripted scenario passed");
    } else {
        return Err("scripted scenario failed".into());
    }

    let mut rng = rand::rng();
    let keys: Vec<String> = (0..KEY_COUNT).map(|_| random_key(&mut rng)).collect();

    let mut table = HashTable::new();
    let mut samples = vec![sample(&table, 0, &[])];

    for (i, key) in keys.iter().enumerate() {
        table.insert(key.as_str(), "value");
        if (i + 1) % SAMPLE_EVERY == 0 {
            samples.push(sample(&table, i + 1, &keys[..=i]));
        }
    }
    let inserted = samples.len();

    for (i, key) in keys.iter().enumerate() {
        table.delete(key);
        if (i + 1) % SAMPLE_EVERY == 0 {
            samples.push(sample(&table, KEY_COUNT + i + 1, &keys[i + 1..]));
        }
    }

    for s in samples.iter().step_by(10) {
        println!(
            "  op {:>6}: len = {:>5}, capacity = {:>5}, load = {:>2}%, avg probes = {:.2}",
            s.operation, s.len, s.capacity, s.load, s.average_probes
        );
    }

    let font_family = "sans-serif";
    let text_size = 16;
    let title_size = 35;
    let blue = RGBColor(50, 90, 220);
    let red = RGBColor(220, 50, 50);

    // Plot 1: capacity and entry count over the whole run
    let root = BitMapBackend::new("table_capacity.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_capacity = samples.iter().map(|s| s.capacity).max().unwrap_or(1) as f64 * 1.1;
    let mut chart = ChartBuilder::on(&root)
        .caption("Table Capacity Across Inserts and Deletes", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..(2 * KEY_COUNT), 0.0..max_capacity)?;

    chart
        .configure_mesh()
        .x_desc("Operations")
        .y_desc("Slots")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    let capacity_style = ShapeStyle::from(&blue).stroke_width(2);
    chart
        .draw_series(LineSeries::new(
            samples.iter().map(|s| (s.operation, s.capacity as f64)),
            capacity_style,
        ))?
        .label("Capacity")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], capacity_style));

    let len_style = ShapeStyle::from(&red).stroke_width(2);
    chart
        .draw_series(LineSeries::new(
            samples.iter().map(|s| (s.operation, s.len as f64)),
            len_style,
        ))?
        .label("Entries")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], len_style));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    // Plot 2: probe length against load while the table fills up
    let root = BitMapBackend::new("average_probes.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_probes = samples
        .iter()
        .map(|s| s.average_probes)
        .fold(1.0, |max, x| if x > max { x } else { max })
        * 1.1;
    let mut chart = ChartBuilder::on(&root)
        .caption("Average Successful Search Probes by Load", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..100_usize, 0.0..max_probes)?;

    chart
        .configure_mesh()
        .x_desc("Load (%)")
        .y_desc("Average probes")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    chart
        .draw_series(
            samples[1..inserted]
                .iter()
                .map(|s| Circle::new((s.load, s.average_probes), 4, blue.filled())),
        )?
        .label("Inserting")
        .legend(move |(x, y)| Circle::new((x + 10, y), 4, blue.filled()));

    chart
        .draw_series(
            samples[inserted..]
                .iter()
                .filter(|s| s.len > 0)
                .map(|s| Circle::new((s.load, s.average_probes), 4, red.filled())),
        )?
        .label("Deleting")
        .legend(move |(x, y)| Circle::new((x + 10, y), 4, red.filled()));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    println!("Generated plot images: table_capacity.png, average_probes.png");

    Ok(())
}
