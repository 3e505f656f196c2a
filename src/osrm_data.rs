//! OSRM dataset preparation (Geofabrik download + dockerized preprocess).
//!
//! Used by the integration tests to stand up a routable region before
//! starting `osrm-routed`. Every step is idempotent: artifacts already on
//! disk are reused.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

/// A Geofabrik extract, e.g. "north-america/us/massachusetts".
#[derive(Debug, Clone)]
pub struct GeofabrikRegion {
    pub path: String,
}

impl GeofabrikRegion {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or("region")
    }

    pub fn url(&self) -> String {
        format!("https://download.geofabrik.de/{}-latest.osm.pbf", self.path)
    }
}

#[derive(Debug)]
pub enum OsrmPrepError {
    Io(io::Error),
    Http(reqwest::Error),
    ProcessFailure(String),
}

impl From<io::Error> for OsrmPrepError {
    fn from(err: io::Error) -> Self {
        OsrmPrepError::Io(err)
    }
}

impl From<reqwest::Error> for OsrmPrepError {
    fn from(err: reqwest::Error) -> Self {
        OsrmPrepError::Http(err)
    }
}

/// A region prepared for the MLD pipeline.
#[derive(Debug, Clone)]
pub struct OsrmDataset {
    pub data_dir: PathBuf,
    pub osrm_base: PathBuf,
}

impl OsrmDataset {
    /// Downloads and preprocesses the region under `data_root`, skipping
    /// whatever is already present.
    pub fn ensure(region: &GeofabrikRegion, data_root: impl Into<PathBuf>) -> Result<Self, OsrmPrepError> {
        let data_root: PathBuf = data_root.into();
        let data_root = if data_root.is_absolute() {
            data_root
        } else {
            std::env::current_dir()?.join(data_root)
        };
        let data_dir = data_root.join(region.name());
        fs::create_dir_all(&data_dir)?;

        let pbf_path = data_dir.join(format!("{}-latest.osm.pbf", region.name()));
        if !pbf_path.exists() {
            download_pbf(&region.url(), &pbf_path)?;
        }

        let osrm_base = data_dir.join(format!("{}-latest.osrm", region.name()));
        if !osrm_base.exists() {
            run_osrm_backend(
                &["osrm-extract", "-p", "/opt/car.lua", &format!("/data/{}", file_name(&pbf_path))],
                &data_dir,
            )?;
        }

        if !mld_ready(&osrm_base) {
            let base = format!("/data/{}", file_name(&osrm_base));
            run_osrm_backend(&["osrm-partition", &base], &data_dir)?;
            run_osrm_backend(&["osrm-customize", &base], &data_dir)?;
        }

        Ok(Self { data_dir, osrm_base })
    }
}

fn download_pbf(url: &str, dest: &Path) -> Result<(), OsrmPrepError> {
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    // Write through a temp file so an interrupted download is retried.
    let tmp_path = dest.with_extension("tmp");
    let mut writer = BufWriter::new(File::create(&tmp_path)?);
    writer.write_all(&response.bytes()?)?;
    writer.flush()?;
    fs::rename(tmp_path, dest)?;
    Ok(())
}

fn mld_ready(osrm_base: &Path) -> bool {
    ["osrm.partition", "osrm.mldgr", "osrm.cells"]
        .iter()
        .all(|ext| osrm_base.with_extension(ext).exists())
}

fn run_osrm_backend(args: &[&str], data_dir: &Path) -> Result<(), OsrmPrepError> {
    let status = Command::new("docker")
        .args(["run", "--rm", "-t", "-v"])
        .arg(format!("{}:/data", data_dir.display()))
        .arg("osrm/osrm-backend")
        .args(args)
        .status()?;

    if status.success() {
        Ok(())
    } else {
        Err(OsrmPrepError::ProcessFailure(format!(
            "docker exited with status {}",
            status
        )))
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string()
}
