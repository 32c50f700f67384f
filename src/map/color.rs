use crate::cluster::ClusterLabel;

/// Signal bands from strongest to weakest: a value belongs to the first band
/// whose threshold it is strictly above.
pub const SIGNAL_SCALE: [(i32, &str); 12] = [
    (-65, "#00FF00"),
    (-70, "#66FF00"),
    (-75, "#99FF00"),
    (-80, "#CCFF00"),
    (-85, "#FFFF00"),
    (-90, "#FFCC00"),
    (-95, "#FF9900"),
    (-100, "#FF6600"),
    (-105, "#FF4400"),
    (-110, "#FF2200"),
    (-115, "#FF0000"),
    (-120, "#000000"),
];

/// Below the weakest band.
pub const OUT_OF_SCALE_COLOR: &str = "#FFF";

pub const GATEWAY_COLOR: &str = "#0000FF";

/// Indexed by `(cluster id + 1) mod len`; slot 0 is where noise lands.
pub const CLUSTER_PALETTE: [&str; 10] = [
    "#888888", "#E6194B", "#3CB44B", "#4363D8", "#F58231", "#911EB4", "#46F0F0", "#F032E6",
    "#BCF60C", "#008080",
];

pub fn signal_band(dbm: i32) -> Option<usize> {
    SIGNAL_SCALE.iter().position(|(threshold, _)| dbm > *threshold)
}

pub fn signal_color(dbm: i32) -> &'static str {
    signal_band(dbm)
        .map(|band| SIGNAL_SCALE[band].1)
        .unwrap_or(OUT_OF_SCALE_COLOR)
}

pub fn cluster_color(label: ClusterLabel) -> &'static str {
    let slot = (label.id() + 1).rem_euclid(CLUSTER_PALETTE.len() as i64);
    CLUSTER_PALETTE[slot as usize]
}
