pub mod corridor;
pub mod domain;
pub mod engine;
pub mod error;
pub mod geo_util;
pub mod polyline_codec;
pub mod repository;
pub mod routing;
pub mod server;
pub mod trip_planning;
