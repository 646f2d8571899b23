/**
 * This module contains everything that produces scene data: procedural
 * geometry, the particle field and the upload of both to the GPU.
 */
pub mod geometry;
pub mod mesh;
pub mod particles;
