use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Error;
use keyed_presort::key_mode::KeyMode;
use keyed_presort::presort::Presort;

use tikv_jemallocator::Jemalloc;
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

fn sort_table(input_path: &Path, output_path: &Path, key_mode: KeyMode) -> Result<(), Error> {
    let mut presort = Presort::new(vec![input_path.to_path_buf()], output_path.to_path_buf());
    presort.with_key_mode(key_mode);
    println!("{}", presort.sort()?);
    Ok(())
}

fn merge_tables(left_path: &Path, right_path: &Path, output_path: &Path, key_mode: KeyMode) -> Result<(), Error> {
    let mut presort = Presort::new(vec![left_path.to_path_buf(), right_path.to_path_buf()], output_path.to_path_buf());
    presort.with_key_mode(key_mode);
    println!("{}", presort.merge()?);
    Ok(())
}

fn sort_merge_tables(left_path: &Path, right_path: &Path, output_path: &Path, key_mode: KeyMode) -> Result<(), Error> {
    let mut presort = Presort::new(vec![left_path.to_path_buf(), right_path.to_path_buf()], output_path.to_path_buf());
    presort.with_key_mode(key_mode);
    println!("{}", presort.sort_merge()?);
    Ok(())
}

// cargo run -r --example presort_tables
pub fn main() -> Result<(), Error> {
    let ddl = fs::read_to_string("./tests/fixtures/schema-id-b-a.sql")?;
    println!("detected key mode: {}", KeyMode::detect(&ddl));

    let left_path = PathBuf::from("./tests/fixtures/left-id-a-b.csv");
    let right_path = PathBuf::from("./tests/fixtures/right-id-a-b.csv");
    let unsorted_path = PathBuf::from("./tests/fixtures/unsorted.csv");
    let sorted_path = PathBuf::from("./target/sorted.csv");
    let merged_path = PathBuf::from("./target/merged.csv");
    let sort_merged_path = PathBuf::from("./target/sort-merged.csv");

    sort_table(&unsorted_path, &sorted_path, KeyMode::IdAB)?;
    merge_tables(&left_path, &right_path, &merged_path, KeyMode::IdAB)?;
    sort_merge_tables(&left_path, &right_path, &sort_merged_path, KeyMode::IdBA)?;

    Ok(())
}
