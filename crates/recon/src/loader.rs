use std::io::ErrorKind;
use std::path::Path;

use crate::config::CheckConfig;
use crate::error::CheckError;
use crate::model::{Catalog, CatalogSide, MediaRecord};

/// Load the master catalog from a CSV file.
pub fn load_master(path: &Path, config: &CheckConfig) -> Result<Catalog, CheckError> {
    log::debug!("Attempting master csv read from {}", path.display());
    let data = read_input(path)?;
    let catalog = load_master_str(&data, &path.display().to_string(), config)?;
    log::debug!(
        "Master csv read and sorted from path {}: {} files found, {} video files filtered",
        path.display(),
        catalog.rows_read,
        catalog.count()
    );
    Ok(catalog)
}

/// Load the LTO catalog from a CSV file.
pub fn load_lto(path: &Path, config: &CheckConfig) -> Result<Catalog, CheckError> {
    log::debug!("Attempting LTO csv read from {}", path.display());
    let data = read_input(path)?;
    let catalog = load_lto_str(&data, &path.display().to_string(), config)?;
    log::debug!(
        "LTO csv read and sorted from path {}: {} files found, {} video files filtered",
        path.display(),
        catalog.rows_read,
        catalog.count()
    );
    Ok(catalog)
}

/// Parse master CSV text. `source` only labels errors.
pub fn load_master_str(
    csv_data: &str,
    source: &str,
    config: &CheckConfig,
) -> Result<Catalog, CheckError> {
    let col = &config.master.columns;
    let mut reader = csv_reader(csv_data);
    let headers = read_headers(&mut reader, source)?;

    let idx = |name: &str| column_index(&headers, name, CatalogSide::Master);
    let name_idx = idx(&col.name)?;
    let frames_idx = idx(&col.frames)?;
    let size_idx = idx(&col.size)?;
    let md5_idx = idx(&col.md5)?;

    let mut records = Vec::new();
    let mut rows_read = 0;

    for record in reader.records() {
        let record = record.map_err(|e| CheckError::csv(source, e))?;
        rows_read += 1;

        let frames = field(&record, frames_idx);
        if config.filter.excludes(frames) {
            continue;
        }

        let name = normalize_name(field(&record, name_idx));
        if name.is_empty() {
            log::debug!("master row {rows_read}: empty name, skipped");
            continue;
        }

        records.push(MediaRecord {
            name: name.to_string(),
            frames: frames.to_string(),
            size: field(&record, size_idx).to_string(),
            md5: field(&record, md5_idx).to_string(),
            media: None,
        });
    }

    Ok(finish(CatalogSide::Master, records, rows_read))
}

/// Parse LTO CSV text. Rows outside the camera-master path are dropped.
pub fn load_lto_str(
    csv_data: &str,
    source: &str,
    config: &CheckConfig,
) -> Result<Catalog, CheckError> {
    let col = &config.lto.columns;
    let marker = config.lto.path_marker.as_str();
    let mut reader = csv_reader(csv_data);
    let headers = read_headers(&mut reader, source)?;

    let idx = |name: &str| column_index(&headers, name, CatalogSide::Lto);
    let name_idx = idx(&col.name)?;
    let frames_idx = idx(&col.frames)?;
    let size_idx = idx(&col.size)?;
    let md5_idx = idx(&col.md5)?;
    let path_idx = idx(&col.path)?;
    let media_idx = idx(&col.media)?;

    let mut records = Vec::new();
    let mut rows_read = 0;

    for record in reader.records() {
        let record = record.map_err(|e| CheckError::csv(source, e))?;
        rows_read += 1;

        if !field(&record, path_idx).contains(marker) {
            continue;
        }

        let frames = field(&record, frames_idx);
        if config.filter.excludes(frames) {
            continue;
        }

        let name = normalize_name(field(&record, name_idx));
        if name.is_empty() {
            log::debug!("lto row {rows_read}: empty name, skipped");
            continue;
        }

        records.push(MediaRecord {
            name: name.to_string(),
            frames: frames.to_string(),
            size: field(&record, size_idx).to_string(),
            md5: field(&record, md5_idx).to_string(),
            media: Some(field(&record, media_idx).to_string()),
        });
    }

    Ok(finish(CatalogSide::Lto, records, rows_read))
}

/// Strip everything from the first '.' on: "clip.v2.mov" -> "clip".
pub fn normalize_name(raw: &str) -> &str {
    raw.split('.').next().unwrap_or("")
}

fn read_input(path: &Path) -> Result<String, CheckError> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CheckError::NotFound { path: path.display().to_string() },
        ErrorKind::InvalidData => CheckError::csv(path.display(), e),
        _ => CheckError::io(path.display(), e),
    })
}

fn csv_reader(csv_data: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes())
}

fn read_headers(reader: &mut csv::Reader<&[u8]>, source: &str) -> Result<Vec<String>, CheckError> {
    Ok(reader
        .headers()
        .map_err(|e| CheckError::csv(source, e))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect())
}

fn column_index(headers: &[String], name: &str, side: CatalogSide) -> Result<usize, CheckError> {
    headers.iter().position(|h| h == name).ok_or_else(|| CheckError::MissingColumn {
        catalog: side,
        column: name.into(),
    })
}

/// Short rows read as empty cells.
fn field(record: &csv::StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("")
}

fn finish(side: CatalogSide, mut records: Vec<MediaRecord>, rows_read: usize) -> Catalog {
    records.sort_by(|a, b| a.name.cmp(&b.name));
    Catalog { side, records, rows_read }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MASTER: &str = "\
Name,Frames,File Size,MD5,Codec
clip02.mov,240,1000,aaa,ProRes
clip01.mov,120,500,bbb,ProRes
still.jpg,1,20,ccc,JPEG
sidecar.xml,,4,ddd,
";

    const LTO: &str = "\
Name,Frames,Size,MD5,Path,Media
clip01.mov,120,500,BBB,/A001/CAMERA_MASTER/clip01.mov,TAPE01
clip01.mov,120,500,bbb,/PROXY/clip01.mov,TAPE01
clip02.mov,240,1000,aaa,/A001/CAMERA_MASTER/clip02.mov,TAPE02
thumb.jpg,1,10,eee,/A001/CAMERA_MASTER/thumb.jpg,TAPE02
";

    #[test]
    fn normalize_splits_on_first_dot() {
        assert_eq!(normalize_name("clip01.mov"), "clip01");
        assert_eq!(normalize_name("clip.v2.mov"), "clip");
        assert_eq!(normalize_name("noext"), "noext");
        assert_eq!(normalize_name(".hidden"), "");
    }

    #[test]
    fn master_filters_and_sorts() {
        let catalog = load_master_str(MASTER, "master.csv", &CheckConfig::default()).unwrap();
        assert_eq!(catalog.side, CatalogSide::Master);
        assert_eq!(catalog.rows_read, 4);
        assert_eq!(catalog.count(), 2);
        assert_eq!(catalog.records[0].name, "clip01");
        assert_eq!(catalog.records[0].size, "500");
        assert_eq!(catalog.records[0].media, None);
        assert_eq!(catalog.records[1].name, "clip02");
    }

    #[test]
    fn lto_requires_camera_master_path() {
        let catalog = load_lto_str(LTO, "lto.csv", &CheckConfig::default()).unwrap();
        assert_eq!(catalog.rows_read, 4);
        assert_eq!(catalog.count(), 2);
        assert_eq!(catalog.records[0].name, "clip01");
        assert_eq!(catalog.records[0].md5, "BBB");
        assert_eq!(catalog.records[0].media.as_deref(), Some("TAPE01"));
        assert_eq!(catalog.records[1].media.as_deref(), Some("TAPE02"));
    }

    #[test]
    fn frames_filter_is_exact() {
        let csv = "\
Name,Frames,File Size,MD5
a.mov, 1,10,x
b.mov,01,10,x
c.mov,1,10,x
";
        let catalog = load_master_str(csv, "master.csv", &CheckConfig::default()).unwrap();
        let names: Vec<_> = catalog.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn missing_master_column() {
        let csv = "Name,Frames,Size,MD5\na.mov,10,1,x\n";
        let err = load_master_str(csv, "master.csv", &CheckConfig::default()).unwrap_err();
        match err {
            CheckError::MissingColumn { catalog, column } => {
                assert_eq!(catalog, CatalogSide::Master);
                assert_eq!(column, "File Size");
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn missing_lto_column() {
        let csv = "Name,Frames,Size,MD5,Path\na.mov,10,1,x,/CAMERA_MASTER/a.mov\n";
        let err = load_lto_str(csv, "lto.csv", &CheckConfig::default()).unwrap_err();
        assert!(matches!(err, CheckError::MissingColumn { ref column, .. } if column == "Media"));
    }

    #[test]
    fn header_bom_and_padding_tolerated() {
        let csv = "\u{feff}Name , Frames,File Size,MD5\nclip.mov,10,1,x\n";
        let catalog = load_master_str(csv, "master.csv", &CheckConfig::default()).unwrap();
        assert_eq!(catalog.count(), 1);
    }

    #[test]
    fn empty_name_skipped() {
        let csv = "Name,Frames,File Size,MD5\n.DS_Store,10,1,x\nclip.mov,10,1,x\n";
        let catalog = load_master_str(csv, "master.csv", &CheckConfig::default()).unwrap();
        assert_eq!(catalog.count(), 1);
        assert_eq!(catalog.records[0].name, "clip");
    }

    #[test]
    fn sort_is_stable_for_duplicate_names() {
        let csv = "\
Name,Frames,Size,MD5,Path,Media
b.mov,10,1,x,/CAMERA_MASTER/b.mov,T2
a.mov,10,1,x,/CAMERA_MASTER/a.mov,T9
a.mov,10,1,x,/CAMERA_MASTER/a.mov,T1
";
        let catalog = load_lto_str(csv, "lto.csv", &CheckConfig::default()).unwrap();
        let tapes: Vec<_> = catalog.records.iter().map(|r| r.media.as_deref().unwrap()).collect();
        assert_eq!(tapes, ["T9", "T1", "T2"]);
    }

    #[test]
    fn sort_uses_normalized_name() {
        let csv = "\
Name,Frames,File Size,MD5
clip-a.mov,10,1,x
clip.v2.mov,10,1,x
";
        let catalog = load_master_str(csv, "master.csv", &CheckConfig::default()).unwrap();
        let names: Vec<_> = catalog.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["clip", "clip-a"]);
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_master(Path::new("/definitely/not/here.csv"), &CheckConfig::default())
            .unwrap_err();
        assert!(matches!(err, CheckError::NotFound { ref path } if path.contains("here.csv")));
    }

    #[test]
    fn custom_marker_from_config() {
        let config = CheckConfig::from_toml("[lto]\npath_marker = \"/PROXY/\"\n").unwrap();
        let catalog = load_lto_str(LTO, "lto.csv", &config).unwrap();
        assert_eq!(catalog.count(), 1);
        assert_eq!(catalog.records[0].md5, "bbb");
    }
}
