//! Procedural medieval town generation
//!
//! A standalone library that generates complete walled towns: Voronoi
//! parcels, a curtain wall with gates and towers, an optional citadel,
//! streets routed from every gate to the market plaza, district
//! assignment and building footprints, all deterministic per seed.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use medieval_town::*;
//!
//! // Generate a town
//! let config = TownConfigBuilder::new()
//!     .seed(42)
//!     .size(TownSize::SmallTown)
//!     .build().unwrap();
//!
//! let town = Model::generate(&config).unwrap();
//!
//! for patch in &town.patches {
//!     if let Some(ward) = &patch.ward {
//!         println!("{:?}: {} buildings", ward.kind, ward.geometry.len());
//!     }
//! }
//! ```
//!
//! # Features
//!
//! - `serde`: Enables serialization support for configuration

// Modules
pub mod config;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod model;
pub mod plan;
pub mod rng;
pub mod topology;
pub mod voronoi;
pub mod wall;
pub mod wards;

// Re-export core types for convenience
pub use config::{TownConfig, TownConfigBuilder, TownSize};
pub use error::{Result, TownError};
pub use geometry::Polygon;
pub use graph::{Graph, NodeId};
pub use model::Model;
pub use plan::{Patch, PlanPolygon, VertexArena, VertexId};
pub use rng::TownRng;
pub use topology::Topology;
pub use voronoi::Voronoi;
pub use wall::CurtainWall;
pub use wards::{Ward, WardKind};

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
