use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::bitmap::{OpacityBitmap, BITMAP_SIZE};
use crate::emit::{write_hit_table, write_path_tables};
use crate::grid::{GridAxis, GridError};
use crate::hits::HitTable;
use crate::manifest::{sha256_hex, GeneratedFile, GeneratedManifest, TABLE_FORMAT_VERSION};
use crate::rings::{generate_ring_path, PathError, RingPath, RingSpec, DEFAULT_RINGS};
use crate::{ScreenLayout, GRID_CELL_HEIGHT, GRID_CELL_WIDTH};

pub const PATHS_FILE_NAME: &str = "sprite_paths.asm";
pub const HITS_FILE_NAME: &str = "sprite_hits.asm";
pub const MANIFEST_FILE_NAME: &str = "tables.manifest.json";

#[derive(Debug, Clone)]
pub struct TableGenConfig {
    pub screen: ScreenLayout,
    pub rings: Vec<RingSpec>,
    pub grid_cell_width: i16,
    pub grid_cell_height: i16,
    pub reference_bitmap: OpacityBitmap,
    pub probe_bitmap: OpacityBitmap,
    // Off reproduces the coordinate-only layout older runtime revisions
    // assemble.
    pub emit_grid_masks: bool,
    // Recorded in the manifest, never in the table text.
    pub generator_version: String,
}

impl Default for TableGenConfig {
    fn default() -> Self {
        Self {
            screen: ScreenLayout::default(),
            rings: DEFAULT_RINGS.to_vec(),
            grid_cell_width: GRID_CELL_WIDTH,
            grid_cell_height: GRID_CELL_HEIGHT,
            reference_bitmap: OpacityBitmap::diamond_test_pattern(),
            probe_bitmap: OpacityBitmap::diamond_test_pattern(),
            emit_grid_masks: true,
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("sprites must be {expected}x{expected} pixels to match the opacity bitmaps, got {width}x{height}")]
    SpriteSizeUnsupported { width: i16, height: i16, expected: usize },
    #[error("ring table is empty")]
    NoRings,
    #[error("ring {ring_index} has no points")]
    RingWithoutPoints { ring_index: usize },
    #[error("ring {ring_index} radius must be positive, got {radius}")]
    RingRadiusNotPositive { ring_index: usize, radius: i32 },
}

#[derive(Debug, Error)]
pub enum TableWriteError {
    #[error("failed to render the {table} table: {source}")]
    Encode {
        table: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode the manifest: {source}")]
    EncodeManifest {
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum TableGenError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Write(#[from] TableWriteError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpriteTables {
    pub paths: Vec<RingPath>,
    pub hits: HitTable,
}

impl SpriteTables {
    pub fn total_waypoints(&self) -> usize {
        self.paths.iter().map(|path| path.waypoints.len()).sum()
    }
}

pub fn build_sprite_tables(config: &TableGenConfig) -> Result<SpriteTables, TableGenError> {
    validate_config(config)?;

    let x_axis = GridAxis::new(
        config.screen.screen_width,
        config.grid_cell_width,
        config.screen.sprite_width,
    )?;
    let y_axis = GridAxis::new(
        config.screen.screen_height,
        config.grid_cell_height,
        config.screen.sprite_height,
    )?;
    // Computed once per axis and shared by every ring.
    let x_masks = x_axis.position_masks();
    let y_masks = y_axis.position_masks();

    let mut paths = Vec::with_capacity(config.rings.len());
    for (ring_index, ring) in config.rings.iter().enumerate() {
        let path = generate_ring_path(ring_index, *ring, &config.screen, &x_masks, &y_masks)?;
        debug!(
            ring_index,
            hradius = path.hradius,
            vradius = path.vradius,
            waypoint_count = path.waypoints.len(),
            "ring_path_generated"
        );
        paths.push(path);
    }

    let hits = HitTable::build(&config.reference_bitmap, &config.probe_bitmap);
    let tables = SpriteTables { paths, hits };

    info!(
        ring_count = tables.paths.len(),
        total_waypoints = tables.total_waypoints(),
        hit_count = tables.hits.hit_count(),
        opaque_reference_pixels = config.reference_bitmap.opaque_pixel_count(),
        opaque_probe_pixels = config.probe_bitmap.opaque_pixel_count(),
        "sprite_tables_built"
    );
    Ok(tables)
}

pub fn write_sprite_tables(
    out_dir: &Path,
    config: &TableGenConfig,
) -> Result<GeneratedManifest, TableGenError> {
    let tables = build_sprite_tables(config)?;

    let mut paths_text = Vec::new();
    write_path_tables(&mut paths_text, &tables.paths, config.emit_grid_masks)
        .map_err(|source| TableWriteError::Encode { table: "sprite_paths", source })?;
    let mut hits_text = Vec::new();
    write_hit_table(&mut hits_text, &tables.hits)
        .map_err(|source| TableWriteError::Encode { table: "sprite_hits", source })?;

    let files = vec![
        write_table_file(out_dir, PATHS_FILE_NAME, &paths_text)?,
        write_table_file(out_dir, HITS_FILE_NAME, &hits_text)?,
    ];

    let manifest = GeneratedManifest {
        table_format_version: TABLE_FORMAT_VERSION,
        generator_version: config.generator_version.clone(),
        ring_count: tables.paths.len(),
        total_waypoints: tables.total_waypoints(),
        hit_flag_count: tables.hits.flags().len(),
        hit_count: tables.hits.hit_count(),
        grid_masks_emitted: config.emit_grid_masks,
        files,
    };
    let manifest_json = serde_json::to_string_pretty(&manifest)
        .map_err(|source| TableWriteError::EncodeManifest { source })?;
    let manifest_path = out_dir.join(MANIFEST_FILE_NAME);
    write_atomic(out_dir, MANIFEST_FILE_NAME, manifest_json.as_bytes())
        .map_err(|source| TableWriteError::Io { path: manifest_path, source })?;

    info!(
        out_dir = %out_dir.display(),
        ring_count = manifest.ring_count,
        total_waypoints = manifest.total_waypoints,
        hit_count = manifest.hit_count,
        grid_masks_emitted = manifest.grid_masks_emitted,
        "sprite_tables_written"
    );
    Ok(manifest)
}

fn validate_config(config: &TableGenConfig) -> Result<(), ConfigError> {
    let expected = BITMAP_SIZE;
    if config.screen.sprite_width != expected as i16
        || config.screen.sprite_height != expected as i16
    {
        return Err(ConfigError::SpriteSizeUnsupported {
            width: config.screen.sprite_width,
            height: config.screen.sprite_height,
            expected,
        });
    }
    if config.rings.is_empty() {
        return Err(ConfigError::NoRings);
    }
    for (ring_index, ring) in config.rings.iter().enumerate() {
        if ring.point_count == 0 {
            return Err(ConfigError::RingWithoutPoints { ring_index });
        }
        if ring.radius <= 0 {
            return Err(ConfigError::RingRadiusNotPositive { ring_index, radius: ring.radius });
        }
    }
    Ok(())
}

fn write_table_file(
    out_dir: &Path,
    file_name: &str,
    bytes: &[u8],
) -> Result<GeneratedFile, TableWriteError> {
    write_atomic(out_dir, file_name, bytes).map_err(|source| TableWriteError::Io {
        path: out_dir.join(file_name),
        source,
    })?;
    let record = GeneratedFile {
        file_name: file_name.to_string(),
        byte_len: bytes.len() as u64,
        sha256_hex: sha256_hex(bytes),
    };
    info!(
        file_name = %record.file_name,
        byte_len = record.byte_len,
        sha256 = %record.sha256_hex,
        "table_file_written"
    );
    Ok(record)
}

// Temp-and-rename so an interrupted run never leaves a half-written table.
fn write_atomic(out_dir: &Path, file_name: &str, bytes: &[u8]) -> io::Result<()> {
    fs::create_dir_all(out_dir)?;
    let tmp_path = out_dir.join(format!("{file_name}.tmp"));
    let final_path = out_dir.join(file_name);

    fs::write(&tmp_path, bytes)?;
    match fs::remove_file(&final_path) {
        Ok(()) => {}
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => {
            let _ = fs::remove_file(&tmp_path);
            return Err(error);
        }
    }
    if let Err(error) = fs::rename(&tmp_path, &final_path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(error);
    }
    Ok(())
}
