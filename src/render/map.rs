use console::style;

use crate::models::Device;

/// One plotted device position.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

/// Geographic extent of the plotted markers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Bounds {
    fn around(lat: f64, lon: f64) -> Self {
        Bounds {
            min_lat: lat,
            max_lat: lat,
            min_lon: lon,
            max_lon: lon,
        }
    }

    fn extend(&mut self, lat: f64, lon: f64) {
        self.min_lat = self.min_lat.min(lat);
        self.max_lat = self.max_lat.max(lat);
        self.min_lon = self.min_lon.min(lon);
        self.max_lon = self.max_lon.max(lon);
    }

    /// Pad degenerate spans so a single marker still gets a usable frame.
    fn padded(mut self) -> Self {
        if (self.max_lat - self.min_lat).abs() < 1.0 {
            self.min_lat -= 5.0;
            self.max_lat += 5.0;
        }
        if (self.max_lon - self.min_lon).abs() < 1.0 {
            self.min_lon -= 5.0;
            self.max_lon += 5.0;
        }
        self
    }
}

const PLOT_WIDTH: usize = 64;
const PLOT_HEIGHT: usize = 16;

/// Marker layer for the scan view. Devices without resolvable coordinates
/// are left out here; the table still carries them.
pub struct MapLayer {
    markers: Vec<MapMarker>,
}

impl MapLayer {
    pub fn from_devices(devices: &[Device]) -> Self {
        let markers = devices
            .iter()
            .filter_map(|device| {
                let (latitude, longitude) = device.coordinates()?;
                Some(MapMarker {
                    latitude,
                    longitude,
                    label: format!(
                        "{} — {}, {}",
                        device.ip(),
                        device.city().unwrap_or("Unknown"),
                        device.country().unwrap_or("Unknown")
                    ),
                })
            })
            .collect();
        MapLayer { markers }
    }

    pub fn markers(&self) -> &[MapMarker] {
        &self.markers
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let mut markers = self.markers.iter();
        let first = markers.next()?;
        let mut bounds = Bounds::around(first.latitude, first.longitude);
        for marker in markers {
            bounds.extend(marker.latitude, marker.longitude);
        }
        Some(bounds)
    }

    /// Equirectangular plot fitted to the marker bounds, followed by the
    /// marker list. With nothing to plot, renders a note instead.
    pub fn render(&self) -> String {
        let Some(bounds) = self.bounds() else {
            return style("No devices with coordinates to display on the map.")
                .dim()
                .to_string();
        };
        let bounds = bounds.padded();

        let mut grid = vec![vec![' '; PLOT_WIDTH]; PLOT_HEIGHT];
        for marker in &self.markers {
            let x = ((marker.longitude - bounds.min_lon) / (bounds.max_lon - bounds.min_lon)
                * (PLOT_WIDTH - 1) as f64)
                .round() as usize;
            // latitude grows upward, rows grow downward
            let y = ((bounds.max_lat - marker.latitude) / (bounds.max_lat - bounds.min_lat)
                * (PLOT_HEIGHT - 1) as f64)
                .round() as usize;
            grid[y.min(PLOT_HEIGHT - 1)][x.min(PLOT_WIDTH - 1)] = '●';
        }

        let mut lines = Vec::with_capacity(PLOT_HEIGHT + self.markers.len() + 3);
        lines.push(format!("┌{}┐", "─".repeat(PLOT_WIDTH)));
        for row in grid {
            lines.push(format!("│{}│", row.into_iter().collect::<String>()));
        }
        lines.push(format!("└{}┘", "─".repeat(PLOT_WIDTH)));
        for marker in &self.markers {
            lines.push(format!(
                "  {} {}  ({:.4}, {:.4})",
                style("●").cyan(),
                marker.label,
                marker.latitude,
                marker.longitude
            ));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn devices() -> Vec<Device> {
        serde_json::from_value(json!([
            {
                "ip_str": "198.51.100.23",
                "location": { "latitude": 37.5665, "longitude": 126.978, "city": "Seoul", "country_name": "South Korea" }
            },
            {
                "ip_str": "203.0.113.8",
                "latitude": 52.52,
                "longitude": 13.405,
                "country_name": "Germany"
            },
            {
                "ip_str": "192.0.2.44"
            }
        ]))
        .unwrap()
    }

    #[test]
    fn test_devices_without_coordinates_excluded() {
        let layer = MapLayer::from_devices(&devices());
        assert_eq!(layer.markers().len(), 2);
        assert!(!layer.render().contains("192.0.2.44"));
    }

    #[test]
    fn test_bounds_cover_all_markers() {
        let layer = MapLayer::from_devices(&devices());
        let bounds = layer.bounds().unwrap();
        assert!(bounds.min_lat <= 37.5665 && bounds.max_lat >= 52.52);
        assert!(bounds.min_lon <= 13.405 && bounds.max_lon >= 126.978);
    }

    #[test]
    fn test_empty_layer_renders_note() {
        let layer = MapLayer::from_devices(&[]);
        assert!(layer.is_empty());
        assert!(layer.render().contains("No devices with coordinates"));
    }

    #[test]
    fn test_single_marker_renders() {
        let only: Vec<Device> = serde_json::from_value(json!([
            { "ip_str": "198.51.100.23", "latitude": 0.0, "longitude": 0.0 }
        ]))
        .unwrap();
        let layer = MapLayer::from_devices(&only);
        let rendered = layer.render();
        assert!(rendered.contains('●'));
        assert!(rendered.contains("198.51.100.23"));
    }
}
