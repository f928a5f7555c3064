//! Core type definitions for image metadata records
//!
//! This module provides the fundamental types used throughout the
//! dicomstore library:
//! - [`ImageMetadata`]: Full per-image record with study/series/instance/patient groups
//! - [`MetadataSource`]: Ingest payload consumed by the store
//! - [`ImagePlane`]: Derived slice geometry in patient coordinate space
//! - [`MultiframeInfo`]: Derived multiframe timing structure

mod image_plane;
mod multiframe;
mod record;

pub use image_plane::{ImagePlane, Vector3};
pub use multiframe::{FrameIncrementPointer, MultiframeInfo};
pub use record::{
    CustomSection, ImageMetadata, InstanceMetadata, MetadataSource, PatientMetadata,
    SeriesMetadata, StudyMetadata,
};
