//! Synthetic measurement files built from a list of station names.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;

use crate::decimal::Decimal;
use crate::error::{BrcError, Result};

const SPREAD: i64 = 1_000;
const LIMIT: i64 = 99_999;
const PROGRESS_EVERY: u64 = 50_000_000;

#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub name: String,
    /// Scaled by 100.
    pub mean: i64,
}

#[derive(Debug, Clone)]
pub struct Generator {
    stations: Vec<Station>,
}

impl Generator {
    /// Reads `name` or `name;mean` per line. Blank lines and `#` comments
    /// are skipped; repeated names are kept once.
    pub fn load_stations(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| BrcError::io(path, e))?;

        let mut seen = HashSet::new();
        let mut stations = Vec::new();
        for line in text.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (name, mean) = match line.split_once(';') {
                Some((name, mean)) => {
                    let mean: f64 = mean.trim().parse().map_err(|_| BrcError::Generate {
                        message: format!("bad mean temperature in line {line:?}"),
                    })?;
                    (name, (mean * 100.0).round() as i64)
                }
                None => (line, 0),
            };
            if name.is_empty() {
                continue;
            }
            if seen.insert(name.to_owned()) {
                stations.push(Station {
                    name: name.to_owned(),
                    mean: mean.clamp(-LIMIT, LIMIT),
                });
            }
        }

        Self::new(stations)
    }

    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            names
                .into_iter()
                .map(|name| Station {
                    name: name.into(),
                    mean: 0,
                })
                .collect(),
        )
    }

    fn new(stations: Vec<Station>) -> Result<Self> {
        if stations.is_empty() {
            return Err(BrcError::Generate {
                message: "station list is empty".to_owned(),
            });
        }
        if let Some(bad) = stations.iter().find(|s| s.name.contains(';')) {
            return Err(BrcError::Generate {
                message: format!("station name {:?} contains the delimiter", bad.name),
            });
        }
        Ok(Generator { stations })
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Writes `rows` newline-terminated lines. The same seed always yields
    /// the same bytes.
    pub fn write_rows<W: Write>(&self, out: &mut W, rows: u64, seed: u64) -> std::io::Result<()> {
        let mut rng = SplitMix64(seed);
        for row in 0..rows {
            let station = &self.stations[(rng.next_u64() % self.stations.len() as u64) as usize];
            let jitter = (rng.next_u64() % (2 * SPREAD as u64 + 1)) as i64 - SPREAD;
            let value = Decimal::from_scaled((station.mean + jitter).clamp(-LIMIT, LIMIT));
            writeln!(out, "{};{}", station.name, value)?;

            if row > 0 && row % PROGRESS_EVERY == 0 {
                info!("generated {row} rows");
            }
        }
        Ok(())
    }

    /// Writes `rows` lines to `path`, refusing to replace an existing file
    /// unless `force` is set.
    pub fn generate_file(&self, path: impl AsRef<Path>, rows: u64, seed: u64, force: bool) -> Result<()> {
        let path = path.as_ref();
        if path.exists() && !force {
            return Err(BrcError::Generate {
                message: format!("{} already exists, pass --force to overwrite", path.display()),
            });
        }

        let file = File::create(path).map_err(|e| BrcError::io(path, e))?;
        let mut writer = BufWriter::with_capacity(1 << 20, file);
        self.write_rows(&mut writer, rows, seed)
            .and_then(|()| writer.flush())
            .map_err(|e| BrcError::io(path, e))?;
        info!("wrote {} rows to {}", rows, path.display());
        Ok(())
    }
}

struct SplitMix64(u64);

impl SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_names_with_and_without_means() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# station;mean\nHamburg;12.0\n\nBulawayo;18.9\nPalembang\nHamburg;3.0").unwrap();

        let generator = Generator::load_stations(file.path()).unwrap();
        assert_eq!(
            generator.stations(),
            &[
                Station { name: "Hamburg".into(), mean: 1200 },
                Station { name: "Bulawayo".into(), mean: 1890 },
                Station { name: "Palembang".into(), mean: 0 },
            ]
        );
    }

    #[test]
    fn empty_station_list_is_an_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(matches!(
            Generator::load_stations(file.path()),
            Err(BrcError::Generate { .. })
        ));
        assert!(Generator::from_names(Vec::<String>::new()).is_err());
        assert!(Generator::from_names(["a;b"]).is_err());
    }

    #[test]
    fn rows_follow_the_input_grammar() {
        let generator = Generator::from_names(["alpha", "beta", "gamma"]).unwrap();
        let mut buf = Vec::new();
        generator.write_rows(&mut buf, 500, 7).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 500);
        for line in text.lines() {
            let (name, value) = line.split_once(';').unwrap();
            assert!(["alpha", "beta", "gamma"].contains(&name));
            let value = Decimal::parse(value.as_bytes()).unwrap();
            assert!(value.scaled().abs() <= SPREAD);
        }
    }

    #[test]
    fn same_seed_same_output() {
        let generator = Generator::from_names(["a", "b"]).unwrap();
        let run = |seed| {
            let mut buf = Vec::new();
            generator.write_rows(&mut buf, 100, seed).unwrap();
            buf
        };
        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43));
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");
        let generator = Generator::from_names(["a"]).unwrap();

        generator.generate_file(&path, 3, 1, false).unwrap();
        assert!(generator.generate_file(&path, 3, 1, false).is_err());
        generator.generate_file(&path, 5, 1, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 5);
    }
}
