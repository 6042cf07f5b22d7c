use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{error, info, warn};

use super::model::{Address, Geolocation};

const FIELD_COUNT: usize = 15;

/// Read-only, in-memory CEP lookup table.
///
/// Loaded once at startup and shared by every connection; lookups never
/// mutate, so no locking is needed.
#[derive(Debug, Clone, Default)]
pub struct CepRepository {
    addresses: HashMap<String, Address>,
}

fn clean(field: &str) -> String {
    field.replace('"', "")
}

fn parse_line(line: &str) -> Option<Address> {
    let f: Vec<&str> = line.split(';').collect();
    if f.len() < FIELD_COUNT {
        return None;
    }
    Some(Address {
        cep: clean(f[0]).replace('-', ""),
        street: clean(f[1]),
        complement: clean(f[2]),
        unit: clean(f[3]),
        neighborhood: clean(f[4]),
        city: clean(f[5]),
        uf: clean(f[6]),
        state: clean(f[7]),
        region: clean(f[8]),
        ibge: clean(f[9]),
        gia: clean(f[10]),
        ddd: clean(f[11]),
        siafi: clean(f[12]),
        geolocation: Geolocation {
            lat: clean(f[13]),
            lng: clean(f[14]),
        },
    })
}

impl CepRepository {
    #[must_use]
    pub fn new(addresses: impl IntoIterator<Item = Address>) -> Self {
        Self {
            addresses: addresses
                .into_iter()
                .map(|a| (a.cep.clone(), a))
                .collect(),
        }
    }

    /// Parse semicolon-separated records; the first line is a header.
    ///
    /// Quotes are stripped from every field and dashes from the CEP. Lines
    /// with fewer than 15 fields are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from `reader` fails.
    pub fn from_csv_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut addresses = HashMap::new();
        for (index, line) in reader.lines().enumerate().skip(1) {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(&line) {
                Some(address) => {
                    addresses.insert(address.cep.clone(), address);
                }
                None => warn!(line = index + 1, "Skipping CEP record with missing fields"),
            }
        }
        Ok(Self { addresses })
    }

    /// Load the CSV file at `path`.
    ///
    /// A missing or unreadable file is logged and produces an empty
    /// repository, so the server still starts and answers 404 for every CEP.
    #[must_use]
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let loaded = File::open(path).and_then(|f| Self::from_csv_reader(BufReader::new(f)));
        match loaded {
            Ok(repo) => {
                info!(path = %path.display(), records = repo.len(), "CEP data loaded");
                repo
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Error reading CEP data");
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn find_by_cep(&self, cep: &str) -> Option<&Address> {
        self.addresses.get(cep)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}
