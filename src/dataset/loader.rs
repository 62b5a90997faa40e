//! Dataset loading.
//!
//! First phase of the load-then-render contract: resolve the source, read
//! the CSV, and coerce every record into a [`Track`]. Loading is the only
//! blocking step of a chart; everything after it is pure computation.

use super::fetch::DatasetClient;
use super::schema::{Field, Track};
use crate::utils::error::LoadError;
use csv::{ByteRecord, ReaderBuilder};
use log::{debug, info, warn};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

/// Where the dataset comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// Local CSV file
    Path(PathBuf),
    /// Remote CSV served over http(s)
    Url(String),
}

impl DatasetSource {
    /// Interpret a user-supplied location
    pub fn parse(location: &str) -> Result<Self, LoadError> {
        let location = location.trim();

        if location.is_empty() {
            return Err(LoadError::InvalidSource(
                "Dataset location cannot be empty".to_string(),
            ));
        }

        if location.starts_with("http://") || location.starts_with("https://") {
            Ok(Self::Url(location.to_string()))
        } else if location.contains("://") {
            Err(LoadError::InvalidSource(format!(
                "Unsupported scheme in {}",
                location
            )))
        } else {
            Ok(Self::Path(PathBuf::from(location)))
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::Path(path) => write!(f, "{}", path.display()),
            DatasetSource::Url(url) => f.write_str(url),
        }
    }
}

/// Load every row of the dataset
///
/// # Errors
/// * `LoadError::Io` - file cannot be opened
/// * `LoadError::RequestFailed` / `LoadError::BadStatus` - remote fetch failed
/// * `LoadError::MissingHeader` - no recognised column in the header row
pub fn load_dataset(source: &DatasetSource) -> Result<Vec<Track>, LoadError> {
    info!("Loading dataset: {}", source);

    let tracks = match source {
        DatasetSource::Path(path) => {
            let file = File::open(path)?;
            parse_dataset(BufReader::new(file))?
        }
        DatasetSource::Url(url) => {
            let body = DatasetClient::new()?.fetch(url)?;
            parse_dataset(body.as_slice())?
        }
    };

    info!("Loaded {} rows", tracks.len());

    Ok(tracks)
}

/// Parse CSV content into tracks
///
/// Invalid UTF-8 is decoded lossily and short rows leave their missing
/// fields empty. Records the CSV reader cannot read at all are skipped.
pub fn parse_dataset<R: Read>(reader: R) -> Result<Vec<Track>, LoadError> {
    let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = csv_reader.byte_headers()?.clone();
    let columns = ColumnIndex::from_headers(&headers);

    if columns.is_empty() {
        return Err(LoadError::MissingHeader);
    }

    for missing in columns.missing() {
        debug!("Column '{}' not present, field stays empty", missing);
    }

    let mut tracks = Vec::new();
    for (index, result) in csv_reader.byte_records().enumerate() {
        match result {
            Ok(record) => tracks.push(columns.track(&record)),
            Err(e) => {
                // Log but don't fail - one bad line shouldn't hide a chart
                warn!("Failed to read row {}: {}", index + 1, e);
            }
        }
    }

    Ok(tracks)
}

/// Position of each known field in the header row
struct ColumnIndex {
    positions: Vec<(Field, Option<usize>)>,
}

impl ColumnIndex {
    fn from_headers(headers: &ByteRecord) -> Self {
        let names: Vec<String> = headers
            .iter()
            .map(|raw| {
                String::from_utf8_lossy(raw)
                    .trim_start_matches('\u{feff}')
                    .trim()
                    .to_string()
            })
            .collect();

        let positions = Field::ALL
            .iter()
            .map(|field| {
                let position = names.iter().position(|name| name == field.column());
                (*field, position)
            })
            .collect();

        Self { positions }
    }

    fn is_empty(&self) -> bool {
        self.positions.iter().all(|(_, position)| position.is_none())
    }

    fn missing(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.positions
            .iter()
            .filter(|(_, position)| position.is_none())
            .map(|(field, _)| field.column())
    }

    fn track(&self, record: &ByteRecord) -> Track {
        let mut track = Track::default();

        for (field, position) in &self.positions {
            if let Some(raw) = position.and_then(|i| record.get(i)) {
                track.set(*field, &String::from_utf8_lossy(raw));
            }
        }

        track
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
track_name,artist(s)_name,artist_count,released_year,released_month,released_day,streams,bpm,key,mode
Seven,\"Latto, Jung Kook\",2,2023,7,14,141381703,125,B,Major
LALA,Myke Towers,1,2023,3,23,133716286,92,C#,Major
vampire,Olivia Rodrigo,1,2023,6,30,BPM110KeyAMode,138,F,Major
";

    #[test]
    fn test_parse_dataset() {
        let tracks = parse_dataset(SAMPLE.as_bytes()).unwrap();

        assert_eq!(tracks.len(), 3);
        assert_eq!(tracks[0].artist_names, "Latto, Jung Kook");
        assert_eq!(tracks[0].streams, Some(141_381_703.0));
        assert_eq!(tracks[1].key, "C#");
        assert_eq!(tracks[2].streams, None);
        assert_eq!(tracks[2].bpm, Some(138.0));
    }

    #[test]
    fn test_parse_dataset_short_row() {
        let csv = "released_month,streams,mode\n5,100\n";
        let tracks = parse_dataset(csv.as_bytes()).unwrap();

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].released_month, "5");
        assert_eq!(tracks[0].mode, "");
    }

    #[test]
    fn test_parse_dataset_header_only() {
        let tracks = parse_dataset("released_month,streams\n".as_bytes()).unwrap();
        assert!(tracks.is_empty());
    }

    #[test]
    fn test_parse_dataset_zero_bytes() {
        let result = parse_dataset(&b""[..]);
        assert!(matches!(result, Err(LoadError::MissingHeader)));
    }

    #[test]
    fn test_load_zero_byte_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let source = DatasetSource::Path(file.path().to_path_buf());

        assert!(matches!(load_dataset(&source), Err(LoadError::MissingHeader)));
    }

    #[test]
    fn test_parse_dataset_unknown_columns() {
        let result = parse_dataset("foo,bar\n1,2\n".as_bytes());
        assert!(matches!(result, Err(LoadError::MissingHeader)));
    }

    #[test]
    fn test_parse_dataset_lossy_utf8() {
        let mut bytes = b"track_name,mode\n".to_vec();
        bytes.extend_from_slice(b"Caf\xe9,Minor\n");

        let tracks = parse_dataset(bytes.as_slice()).unwrap();
        assert_eq!(tracks[0].mode, "Minor");
        assert!(tracks[0].track_name.starts_with("Caf"));
    }

    #[test]
    fn test_dataset_source_parse() {
        assert_eq!(
            DatasetSource::parse("https://example.com/spotify-2023.csv").unwrap(),
            DatasetSource::Url("https://example.com/spotify-2023.csv".to_string())
        );
        assert_eq!(
            DatasetSource::parse("data/spotify-2023.csv").unwrap(),
            DatasetSource::Path(PathBuf::from("data/spotify-2023.csv"))
        );
        assert!(DatasetSource::parse("").is_err());
        assert!(DatasetSource::parse("ftp://example.com/data.csv").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let source = DatasetSource::Path(PathBuf::from("/definitely/not/here.csv"));
        assert!(matches!(load_dataset(&source), Err(LoadError::Io(_))));
    }
}
