pub mod formatting;
pub mod map;
pub mod progress;
pub mod table;

pub use map::{MapLayer, MapMarker};
pub use progress::spinner;
pub use table::{
    alerts_table, device_detail, device_table, exposure_summary, no_results_notice,
    notifications_list,
};
