mod builder;
mod color;
pub mod feature;

pub use builder::{
    build_cluster_map, build_config_coverage_maps, build_gateway_coverage_maps, build_gateway_map,
};
pub use feature::FeatureCollection;
