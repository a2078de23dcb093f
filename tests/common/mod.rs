use std::fs;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

use data_encoding::HEXLOWER;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn setup() {
    let results_dir_path = PathBuf::from_str("./target/results/").unwrap();

    if !results_dir_path.exists() {
        fs::create_dir_all(&results_dir_path).unwrap_or_else(|_|
            panic!("Failed to create results directory: {:?}", results_dir_path)
        );
    }
}

#[allow(dead_code)]
pub fn read_lines(path: PathBuf) -> Result<Vec<String>, anyhow::Error> {
    let reader = BufReader::new(File::open(path)?);
    let lines = reader.lines().map(|x| x.unwrap()).collect();
    Ok(lines)
}

#[allow(dead_code)]
pub fn write_lines(path: &PathBuf, lines: &[String]) -> Result<(), anyhow::Error> {
    let mut writer = BufWriter::new(File::create(path)?);
    for line in lines {
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}

#[allow(dead_code)]
pub fn temp_file_name(dir: &str) -> PathBuf {
    let mut result = PathBuf::from(dir);
    let name = HEXLOWER.encode(&rand::random::<[u8; 16]>());
    result.push(name);
    result
}

/// A parsed output line: (id, a, b, updated_at)
#[allow(dead_code)]
pub type Row = (i64, String, String, String);

#[allow(dead_code)]
pub fn parse_row(line: &str) -> Row {
    let parts: Vec<&str> = line.splitn(4, ',').collect();
    (
        parts[0].parse().unwrap(),
        parts[1].to_string(),
        parts[2].to_string(),
        parts[3].to_string(),
    )
}

#[allow(dead_code)]
pub fn format_row(row: &Row) -> String {
    format!("{},{},{},{}", row.0, row.1, row.2, row.3)
}

/// `count` random rows with small value ranges so that keys collide often
#[allow(dead_code)]
pub fn random_rows(seed: u64, count: usize) -> Vec<Row> {
    let mut rng = StdRng::seed_from_u64(seed);
    let letters = ["a", "b", "c"];
    (0..count)
        .map(|_| {
            (
                rng.gen_range(-50..50),
                letters[rng.gen_range(0..letters.len())].to_string(),
                letters[rng.gen_range(0..letters.len())].to_string(),
                format!("2020-{:02}-{:02}", rng.gen_range(1..13), rng.gen_range(1..29)),
            )
        })
        .collect()
}
